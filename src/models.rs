//! Core data models used throughout Scheme Desk.
//!
//! These types represent the scheme records held in the catalog and the
//! query that flows through the matcher.

use serde::{Deserialize, Serialize};

/// A government welfare scheme as returned to clients.
///
/// Serialized field order (`name`, `description`, `eligibility`, `link`) is
/// the wire shape of every element in a `POST /query-schemes` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub name: String,
    pub description: String,
    pub eligibility: String,
    pub link: String,
}

/// A user's query as sent by the client app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Language the user spoke or typed in. Logged, not used for matching.
    pub language: String,
    pub text: String,
}
