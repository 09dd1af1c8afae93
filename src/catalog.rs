// src/catalog.rs
//! Parser for the device-catalog export.
//!
//! Each non-empty row is positional `brand,name,code,model`. Devices whose
//! display names normalize to the same key form a *family*, the unit of
//! ranking in the final report.

use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// One catalog entry, keyed by its device code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub code: String,
    pub brand: String,
    pub name: String,
    pub model: String,
    pub family_key: String,
    pub install_count: u64,
}

/// A group of devices sharing a normalized display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Family {
    pub key: String,
    /// Brand of the first catalog row seen for this key; later rows never
    /// overwrite it.
    pub brand: String,
    /// Device codes in catalog order. A code repeated in the catalog appears
    /// here twice even though the device map keeps only the latest entry.
    pub member_codes: Vec<String>,
    pub install_count: u64,
}

/// Output of one catalog parse: devices by code plus families in catalog
/// insertion order. That order is the tie-break for the ranking sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub devices_by_code: HashMap<String, Device>,
    pub families: Vec<Family>,
}

impl Catalog {
    /// Looks up a family by its normalized key.
    #[must_use]
    pub fn family(&self, key: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.key == key)
    }
}

pub struct CatalogParser {
    non_word: Regex,
}

impl CatalogParser {
    /// # Errors
    /// Returns error if the family-key pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            non_word: Regex::new(r"[^A-Za-z0-9_]+")?,
        })
    }

    /// Derives the grouping key for a display name: runs of non-word
    /// characters (ASCII classes) collapse to a single underscore, then the
    /// whole string is lower-cased.
    #[must_use]
    pub fn family_key(&self, name: &str) -> String {
        self.non_word.replace_all(name, "_").to_lowercase()
    }

    /// Parses raw catalog text. Total for any string input: rows without a
    /// display name are dropped silently, nothing is ever an error.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Catalog {
        let mut catalog = Catalog::default();
        if raw.is_empty() {
            return catalog;
        }

        let mut index: HashMap<String, usize> = HashMap::new();

        for line in raw.split('\n') {
            let mut fields = line.split(',');
            let brand = fields.next().unwrap_or_default();
            let name = fields.next().unwrap_or_default();
            let code = fields.next().unwrap_or_default();
            let model = fields.next().unwrap_or_default();

            // Blank and malformed rows carry no display name.
            if name.is_empty() {
                continue;
            }

            let key = self.family_key(name);

            match index.get(&key) {
                Some(&i) => catalog.families[i].member_codes.push(code.to_string()),
                None => {
                    index.insert(key.clone(), catalog.families.len());
                    catalog.families.push(Family {
                        key: key.clone(),
                        brand: brand.to_string(),
                        member_codes: vec![code.to_string()],
                        install_count: 0,
                    });
                }
            }

            // A repeated code replaces the earlier device entry while the
            // family keeps both member occurrences. Upstream behavior, kept.
            catalog.devices_by_code.insert(
                code.to_string(),
                Device {
                    code: code.to_string(),
                    brand: brand.to_string(),
                    name: name.to_string(),
                    model: model.to_string(),
                    family_key: key,
                    install_count: 0,
                },
            );
        }

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogParser;

    fn key(name: &str) -> String {
        CatalogParser::new().unwrap().family_key(name)
    }

    #[test]
    fn key_lowercases() {
        assert_eq!(key("Phone"), "phone");
    }

    #[test]
    fn key_collapses_nonword_runs() {
        assert_eq!(key("Galaxy S4 Mini"), "galaxy_s4_mini");
        assert_eq!(key("Phone - One"), "phone_one");
    }

    #[test]
    fn key_keeps_digits_and_underscores() {
        assert_eq!(key("mi_9T"), "mi_9t");
    }

    #[test]
    fn key_preserves_edge_underscores() {
        // Leading/trailing punctuation still maps to an underscore.
        assert_eq!(key("(Phone)"), "_phone_");
    }

    #[test]
    fn key_treats_non_ascii_as_nonword() {
        assert_eq!(key("Téléphone"), "t_l_phone");
    }
}
