//! The scheme catalog: an ordered keyword → scheme mapping.
//!
//! A [`SchemeCatalog`] is built once at startup, either from the built-in
//! data set or from a TOML file named by `[catalog].path`, and is never
//! mutated afterwards. The server shares it across handlers behind an
//! `Arc`, so concurrent reads need no locking.
//!
//! # Catalog file format
//!
//! ```toml
//! [[schemes]]
//! keyword = "pradhan mantri kisan samman nidhi"
//! name = "Pradhan Mantri Kisan Samman Nidhi (PM-KISAN)"
//! description = "..."
//! eligibility = "All landholding farmer families."
//! link = "https://pmkisan.gov.in/"
//! ```
//!
//! Entries keep file order. Keywords are lowercased and trimmed on load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::config::Config;
use crate::models::SchemeRecord;

/// Reasons a set of catalog entries is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate keyword: '{0}'")]
    DuplicateKeyword(String),
    #[error("entry {index} has an empty keyword")]
    EmptyKeyword { index: usize },
    #[error("scheme for keyword '{keyword}' has an empty {field}")]
    EmptyField {
        keyword: String,
        field: &'static str,
    },
}

/// One keyword and the scheme it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub keyword: String,
    pub scheme: SchemeRecord,
}

/// Ordered, immutable keyword → scheme mapping. Keywords are unique and
/// stored lowercase.
#[derive(Debug, Clone)]
pub struct SchemeCatalog {
    entries: Vec<CatalogEntry>,
}

impl SchemeCatalog {
    /// Builds a catalog from `(keyword, scheme)` pairs, preserving order.
    pub fn from_entries<I>(entries: I) -> std::result::Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, SchemeRecord)>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for (index, (keyword, scheme)) in entries.into_iter().enumerate() {
            let keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(CatalogError::EmptyKeyword { index });
            }
            if scheme.name.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    keyword,
                    field: "name",
                });
            }
            if scheme.link.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    keyword,
                    field: "link",
                });
            }
            if !seen.insert(keyword.clone()) {
                return Err(CatalogError::DuplicateKeyword(keyword));
            }
            out.push(CatalogEntry { keyword, scheme });
        }

        Ok(Self { entries: out })
    }

    /// The three schemes the service ships with.
    pub fn builtin() -> Self {
        let entries = vec![
            CatalogEntry {
                keyword: "pradhan mantri kisan samman nidhi".to_string(),
                scheme: SchemeRecord {
                    name: "Pradhan Mantri Kisan Samman Nidhi (PM-KISAN)".to_string(),
                    description: "A government scheme in which all small and marginal farmers will get up to ₹6,000 per year as minimum income support.".to_string(),
                    eligibility: "All landholding farmer families.".to_string(),
                    link: "https://pmkisan.gov.in/".to_string(),
                },
            },
            CatalogEntry {
                keyword: "beti bachao beti padhao".to_string(),
                scheme: SchemeRecord {
                    name: "Beti Bachao, Beti Padhao".to_string(),
                    description: "A campaign of the Government of India that aims to generate awareness and improve the efficiency of welfare services intended for girls.".to_string(),
                    eligibility: "Focused on the girl child.".to_string(),
                    link: "https://wcd.nic.in/bbbp-schemes".to_string(),
                },
            },
            CatalogEntry {
                keyword: "pradhan mantri jan dhan yojana".to_string(),
                scheme: SchemeRecord {
                    name: "Pradhan Mantri Jan Dhan Yojana (PMJDY)".to_string(),
                    description: "National Mission for Financial Inclusion to ensure access to financial services, namely, Banking/ Savings & Deposit Accounts, Remittance, Credit, Insurance, Pension in an affordable manner.".to_string(),
                    eligibility: "Any Indian citizen above the age of 10 years.".to_string(),
                    link: "https://www.pmjdy.gov.in/".to_string(),
                },
            },
        ];
        Self { entries }
    }

    /// Loads a catalog from a TOML file (see module docs for the format).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid catalog file: {}", path.display()))
    }

    /// Parses catalog TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let catalog = Self::from_entries(file.schemes.into_iter().map(|s| {
            (
                s.keyword,
                SchemeRecord {
                    name: s.name,
                    description: s.description,
                    eligibility: s.eligibility,
                    link: s.link,
                },
            )
        }))?;
        Ok(catalog)
    }

    /// Resolves the catalog for a configuration: the `[catalog].path` file
    /// when set, the built-in data set otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.catalog.path {
            Some(path) => {
                let catalog = Self::load(path)?;
                tracing::info!("Loaded {} schemes from {}", catalog.len(), path.display());
                Ok(catalog)
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemeRecord)> {
        self.entries.iter().map(|e| (e.keyword.as_str(), &e.scheme))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    schemes: Vec<CatalogFileEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogFileEntry {
    keyword: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    eligibility: String,
    link: String,
}

/// Print the catalog in order: keyword, scheme name, link.
pub fn list_schemes(config: &Config) -> Result<()> {
    let catalog = SchemeCatalog::from_config(config)?;

    if catalog.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    println!("{:<36} {:<48} LINK", "KEYWORD", "SCHEME");
    for (keyword, scheme) in catalog.iter() {
        println!("{:<36} {:<48} {}", keyword, scheme.name, scheme.link);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> SchemeRecord {
        SchemeRecord {
            name: name.to_string(),
            description: String::new(),
            eligibility: String::new(),
            link: "https://example.gov.in/".to_string(),
        }
    }

    #[test]
    fn test_builtin_order_and_keys() {
        let catalog = SchemeCatalog::builtin();
        let keywords: Vec<&str> = catalog.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keywords,
            vec![
                "pradhan mantri kisan samman nidhi",
                "beti bachao beti padhao",
                "pradhan mantri jan dhan yojana",
            ]
        );
        for (keyword, _) in catalog.iter() {
            assert_eq!(keyword, keyword.to_lowercase());
        }
    }

    #[test]
    fn test_from_entries_normalizes_keywords() {
        let catalog =
            SchemeCatalog::from_entries(vec![("  Ayushman Bharat ".to_string(), record("AB"))])
                .unwrap();
        assert_eq!(catalog.entries()[0].keyword, "ayushman bharat");
    }

    #[test]
    fn test_duplicate_keyword_rejected() {
        let err = SchemeCatalog::from_entries(vec![
            ("ujjwala".to_string(), record("A")),
            ("UJJWALA".to_string(), record("B")),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateKeyword("ujjwala".to_string()));
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let err = SchemeCatalog::from_entries(vec![
            ("ujjwala".to_string(), record("A")),
            ("   ".to_string(), record("B")),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::EmptyKeyword { index: 1 });
    }

    #[test]
    fn test_empty_name_rejected() {
        let err =
            SchemeCatalog::from_entries(vec![("ujjwala".to_string(), record(""))]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyField { field: "name", .. }));
    }

    #[test]
    fn test_empty_link_rejected() {
        let mut scheme = record("Ujjwala");
        scheme.link = "  ".to_string();
        let err = SchemeCatalog::from_entries(vec![("ujjwala".to_string(), scheme)]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyField { field: "link", .. }));
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let catalog = SchemeCatalog::parse(
            r#"
[[schemes]]
keyword = "Stand Up India"
name = "Stand-Up India"
link = "https://www.standupmitra.in/"

[[schemes]]
keyword = "mudra"
name = "Pradhan Mantri MUDRA Yojana"
description = "Loans for micro enterprises."
eligibility = "Non-farm small businesses."
link = "https://www.mudra.org.in/"
"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].keyword, "stand up india");
        assert_eq!(catalog.entries()[0].scheme.description, "");
        assert_eq!(catalog.entries()[1].keyword, "mudra");
        assert_eq!(
            catalog.entries()[1].scheme.eligibility,
            "Non-farm small businesses."
        );
    }

    #[test]
    fn test_parse_missing_link_fails() {
        let result = SchemeCatalog::parse(
            r#"
[[schemes]]
keyword = "mudra"
name = "Pradhan Mantri MUDRA Yojana"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_file_is_empty_catalog() {
        let catalog = SchemeCatalog::parse("").unwrap();
        assert!(catalog.is_empty());
    }
}
