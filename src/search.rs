//! Keyword matching of free-text queries against the scheme catalog.
//!
//! The query text is lowercased and trimmed, then every catalog keyword that
//! occurs anywhere in it selects its scheme. Results follow catalog order;
//! there is no ranking, deduplication, or precedence between overlapping
//! keywords.

use anyhow::Result;
use tracing::{info, warn};

use crate::catalog::SchemeCatalog;
use crate::config::Config;
use crate::models::{QueryRequest, SchemeRecord};

/// Lowercases and trims query text.
pub fn normalize_query(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Returns every scheme whose keyword is a substring of the normalized
/// query text, in catalog order.
///
/// Never fails: a query that matches nothing yields an empty vector.
pub fn match_schemes(catalog: &SchemeCatalog, request: &QueryRequest) -> Vec<SchemeRecord> {
    info!("Received query in {}: '{}'", request.language, request.text);

    let query_text = normalize_query(&request.text);
    let mut matched = Vec::new();

    for (keyword, scheme) in catalog.iter() {
        if query_text.contains(keyword) {
            info!("Matched scheme: {}", scheme.name);
            matched.push(scheme.clone());
        }
    }

    if matched.is_empty() {
        warn!("No schemes found for query: '{}'", query_text);
    }

    matched
}

/// CLI entry point for `scheme-desk query`.
pub fn run_query(config: &Config, text: &str, language: &str, json: bool) -> Result<()> {
    let catalog = SchemeCatalog::from_config(config)?;
    let request = QueryRequest {
        language: language.to_string(),
        text: text.to_string(),
    };

    let results = match_schemes(&catalog, &request);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No schemes found.");
        return Ok(());
    }

    for (i, scheme) in results.iter().enumerate() {
        println!("{}. {}", i + 1, scheme.name);
        println!("    {}", scheme.description);
        println!("    eligibility: {}", scheme.eligibility);
        println!("    link: {}", scheme.link);
        println!();
    }

    Ok(())
}
