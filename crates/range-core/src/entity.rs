//! Entities extracted by the NLU step and their normalization

use crate::error::NotANumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which end of the range an utterance refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Lower,
    Upper,
    /// Any label the NLU model produced that is not "lower" or "upper"
    Other(String),
}

impl Boundary {
    /// Map an NLU boundary label; only the exact labels "lower" and "upper" are known
    pub fn from_label(label: &str) -> Self {
        match label {
            "lower" => Boundary::Lower,
            "upper" => Boundary::Upper,
            other => Boundary::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Lower => write!(f, "lower"),
            Boundary::Upper => write!(f, "upper"),
            Boundary::Other(label) => write!(f, "{label}"),
        }
    }
}

/// A typed fragment of an utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Entity {
    /// A number as spoken or typed, e.g. "one" or "1,000"
    Number(String),
    Boundary(Boundary),
}

impl Entity {
    pub fn number(raw: impl Into<String>) -> Self {
        Entity::Number(raw.into())
    }

    pub fn boundary(label: &str) -> Self {
        Entity::Boundary(Boundary::from_label(label))
    }
}

/// All raw number payloads, in extraction order
pub fn numbers(entities: &[Entity]) -> Vec<&str> {
    entities
        .iter()
        .filter_map(|e| match e {
            Entity::Number(raw) => Some(raw.as_str()),
            Entity::Boundary(_) => None,
        })
        .collect()
}

/// The first boundary entity, if any
pub fn first_boundary(entities: &[Entity]) -> Option<&Boundary> {
    entities.iter().find_map(|e| match e {
        Entity::Boundary(b) => Some(b),
        Entity::Number(_) => None,
    })
}

/// Convert a raw number entity into an integer
///
/// Only "one" and "zero" are recognised as words (exact, case-sensitive).
/// Thousands separators are stripped before parsing.
///
/// # Example
///
/// ```
/// use range_core::normalize_number;
///
/// assert_eq!(normalize_number("one"), Ok(1));
/// assert_eq!(normalize_number("1,000"), Ok(1000));
/// assert!(normalize_number("abc").is_err());
/// ```
pub fn normalize_number(raw: &str) -> Result<i64, NotANumber> {
    let digits = match raw {
        "one" => "1".to_string(),
        "zero" => "0".to_string(),
        other => other.replace(',', ""),
    };

    digits.trim().parse::<i64>().map_err(|_| NotANumber {
        raw: raw.to_string(),
    })
}
