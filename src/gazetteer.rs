//! # City Gazetteer
//!
//! Loads the bundled world city list and answers prefix searches against it,
//! so an observer can be chosen by name instead of by coordinates.
//!
//! ## File Format
//!
//! A JSON array of objects with short keys:
//!
//! ```json
//! [{"ct": "United States", "ad": "Maine", "nm": "Portland", "lt": 43.6591, "ln": -70.2568}]
//! ```
//!
//! ## Query Syntax
//!
//! `"name[, admin[, country]]"`: each comma-separated term is trimmed and
//! matched case-insensitively as a prefix of the corresponding field. Blank
//! terms match anything, so a query of only spaces or commas lists the first
//! `max_results` cities; only the empty string returns nothing. Terms past the
//! third are ignored.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::Observer;

/// Default number of matches returned by a search.
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// Longest label shown before truncating with an ellipsis.
const LABEL_MAX_CHARS: usize = 21;

/// Errors that can occur while loading the city list.
#[derive(Error, Debug)]
pub enum GazetteerError {
    /// City file could not be read
    #[error("city list IO: {0}")]
    Io(#[from] io::Error),

    /// City file is not valid JSON
    #[error("city list parse: {0}")]
    Parse(#[from] serde_json::Error),

    /// City file parsed but the top level is not an array
    #[error("city list must be a JSON array")]
    NotAnArray,
}

/// One entry of the city list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    #[serde(rename = "ct")]
    pub country: String,
    #[serde(rename = "ad")]
    pub admin: String,
    #[serde(rename = "nm")]
    pub name: String,
    #[serde(rename = "lt")]
    pub latitude: f64,
    #[serde(rename = "ln")]
    pub longitude: f64,
}

impl City {
    /// `"name, admin, country"`, cut to 21 characters plus `"..."` when longer.
    pub fn label(&self) -> String {
        let full = format!("{}, {}, {}", self.name, self.admin, self.country);
        if full.chars().count() > LABEL_MAX_CHARS {
            let mut short: String = full.chars().take(LABEL_MAX_CHARS).collect();
            short.push_str("...");
            short
        } else {
            full
        }
    }

    pub fn observer(&self) -> Observer {
        Observer::new(self.latitude, self.longitude)
    }

    fn matches(&self, terms: &[String]) -> bool {
        let fields = [&self.name, &self.admin, &self.country];
        terms
            .iter()
            .zip(fields)
            .all(|(term, field)| term.is_empty() || field.to_lowercase().starts_with(term.as_str()))
    }
}

/// Load the city list from `path`.
///
/// Entries missing a key or carrying the wrong type are skipped with a
/// warning; the rest of the list is still returned.
pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<Vec<City>, GazetteerError> {
    let contents = fs::read_to_string(&path)?;
    let document: serde_json::Value = serde_json::from_str(&contents)?;
    let entries = match document {
        serde_json::Value::Array(entries) => entries,
        _ => return Err(GazetteerError::NotAnArray),
    };

    let total = entries.len();
    let cities: Vec<City> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<City>(entry) {
            Ok(city) => Some(city),
            Err(e) => {
                log::warn!("Skipping city entry {}: {}", index, e);
                None
            }
        })
        .collect();

    log::debug!(
        "Loaded {} of {} cities from {}",
        cities.len(),
        total,
        path.as_ref().display()
    );
    Ok(cities)
}

/// Split a query into at most three trimmed, lower-cased prefix terms.
fn search_terms(query: &str) -> Vec<String> {
    query
        .split(',')
        .take(3)
        .map(|term| term.trim().to_lowercase())
        .collect()
}

/// Cities matching `query`, in list order, at most `max_results` of them.
pub fn search<'a>(query: &str, cities: &'a [City], max_results: usize) -> Vec<&'a City> {
    if query.is_empty() {
        return Vec::new();
    }

    let terms = search_terms(query);
    cities
        .iter()
        .filter(|city| city.matches(&terms))
        .take(max_results)
        .collect()
}
