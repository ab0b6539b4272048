//! Subject-name normalization.
//!
//! Directory and manifest subject tokens are short and inconsistent
//! (`dbms`, `afl`, `Data-Mining`). The normalizer keeps the upper-cased
//! raw token as the grouping code and derives a display name by expanding
//! known abbreviations.

use std::collections::BTreeMap;

/// Abbreviations shipped with the indexer. Config entries extend or
/// override these.
pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("AFL", "AUTOMATA AND FORMAL LANGUAGES"),
    ("AI", "ARTIFICIAL INTELLIGENCE"),
    ("ML", "MACHINE LEARNING"),
    ("DL", "DEEP LEARNING"),
    ("NLP", "NATURAL LANGUAGE PROCESSING"),
    ("DSA", "DATA STRUCTURES AND ALGORITHMS"),
    ("DS", "DATA STRUCTURES"),
    ("DBMS", "DATABASE MANAGEMENT SYSTEMS"),
    ("OS", "OPERATING SYSTEMS"),
    ("OOP", "OBJECT ORIENTED PROGRAMMING"),
    ("OOPJ", "OBJECT ORIENTED PROGRAMMING IN JAVA"),
    ("CC", "CLOUD COMPUTING"),
    ("CN", "COMPUTER NETWORKS"),
    ("COA", "COMPUTER ORGANIZATION AND ARCHITECTURE"),
    ("TOC", "THEORY OF COMPUTATION"),
    ("SE", "SOFTWARE ENGINEERING"),
    ("CD", "COMPILER DESIGN"),
    ("CG", "COMPUTER GRAPHICS"),
    ("HPC", "HIGH PERFORMANCE COMPUTING"),
    ("IOT", "INTERNET OF THINGS"),
    ("DMDW", "DATA MINING AND DATA WAREHOUSING"),
    ("DOS", "DISTRIBUTED OPERATING SYSTEMS"),
    ("IEC", "INTERNATIONAL ECONOMIC"),
];

/// How a single subject token was rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenExpansion<'a> {
    /// Found in the abbreviation table.
    Expanded(&'a str),
    /// Short alphabetic token with no table entry, kept as an acronym.
    Acronym(String),
    /// Anything else, title-cased.
    Word(String),
}

impl TokenExpansion<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            TokenExpansion::Expanded(s) => s,
            TokenExpansion::Acronym(s) | TokenExpansion::Word(s) => s,
        }
    }
}

/// Canonical short code plus optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub code: String,
    pub full: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubjectNormalizer {
    abbreviations: BTreeMap<String, String>,
}

impl SubjectNormalizer {
    /// Build from an explicit table. Keys are upper-cased, expansions trimmed.
    pub fn new<K, V>(table: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let abbreviations = table
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_uppercase(), v.as_ref().trim().to_string()))
            .collect();
        Self { abbreviations }
    }

    /// Default table with `overrides` layered on top.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut normalizer = Self::new(DEFAULT_ABBREVIATIONS.iter().copied());
        for (k, v) in overrides {
            normalizer
                .abbreviations
                .insert(k.to_uppercase(), v.trim().to_string());
        }
        normalizer
    }

    pub fn len(&self) -> usize {
        self.abbreviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty()
    }

    pub fn normalize(&self, raw: &str) -> Subject {
        Subject {
            code: raw.to_uppercase(),
            full: self.full_name(raw),
        }
    }

    /// Expanded display name, or `None` when `raw` has no alphanumeric content.
    pub fn full_name(&self, raw: &str) -> Option<String> {
        let parts: Vec<String> = tokens(raw)
            .map(|t| self.expand_token(t).as_str().to_string())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" ").to_uppercase())
        }
    }

    pub fn expand_token<'a>(&'a self, token: &str) -> TokenExpansion<'a> {
        let upper = token.to_uppercase();
        if let Some(expansion) = self.abbreviations.get(&upper) {
            TokenExpansion::Expanded(expansion)
        } else if token.chars().all(char::is_alphabetic) && token.chars().count() <= 4 {
            TokenExpansion::Acronym(upper)
        } else {
            TokenExpansion::Word(title_case(token))
        }
    }
}

impl Default for SubjectNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_ABBREVIATIONS.iter().copied())
    }
}

fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

fn title_case(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
