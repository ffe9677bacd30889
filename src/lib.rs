//! # Scheme Desk
//!
//! A small HTTP service that takes a free-text query from the VoiceAI Bharat
//! app and returns the government welfare schemes whose keyword appears in
//! it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Catalog      │──▶│   Matcher    │◀──│ HTTP / CLI   │
//! │ builtin/TOML │   │  substring   │   │ axum / clap  │
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! scheme-desk serve
//! scheme-desk query "I want info on PM Kisan Samman Nidhi"
//! scheme-desk schemes
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`catalog`] | Keyword → scheme catalog |
//! | [`search`] | Keyword matching |
//! | [`validation`] | Request body validation |
//! | [`server`] | HTTP server |

pub mod catalog;
pub mod config;
pub mod models;
pub mod search;
pub mod server;
pub mod validation;
