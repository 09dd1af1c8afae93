// src/aggregate.rs
//! Install-log aggregation over a parsed catalog.
//!
//! The pipeline is an ordered sequence of passes: reset device counts,
//! accumulate per-device installs from the log, fold device counts into
//! families, filter out families never seen in the log, stable-sort
//! descending. Every pass works on structures owned by this call, so
//! repeated runs over the same inputs give identical results.

use crate::catalog::{Catalog, Device, Family};
use serde::Serialize;
use std::collections::HashMap;

/// Placeholder identity for log rows whose code has no catalog entry.
/// Normalized family keys are lower-cased, so this capitalized key can never
/// collide with a real family.
pub const UNKNOWN: &str = "Unknown";

// Zero-based field positions consumed from install-log rows.
const CODE_FIELD: usize = 2;
const INSTALLS_FIELD: usize = 9;

/// Outcome of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub devices_by_code: HashMap<String, Device>,
    /// Sum of every parsed install value, matched or not.
    pub total_installs: u64,
    /// Families seen in the log, descending by install count; ties keep
    /// catalog order.
    pub ranked_families: Vec<Family>,
}

/// Aggregates an install-log export against a parsed catalog.
///
/// Total for any string input: rows whose 10th field is not numeric (headers,
/// labels, short rows) are skipped, and codes missing from the catalog get a
/// synthetic [`UNKNOWN`] device that counts toward the total but belongs to
/// no family.
#[must_use]
pub fn aggregate(raw_log: &str, catalog: Catalog) -> AggregationResult {
    let Catalog {
        mut devices_by_code,
        mut families,
    } = catalog;

    for device in devices_by_code.values_mut() {
        device.install_count = 0;
    }

    if raw_log.is_empty() {
        return AggregationResult {
            devices_by_code,
            total_installs: 0,
            ranked_families: Vec::new(),
        };
    }

    let mut total_installs: u64 = 0;

    for line in raw_log.split('\n') {
        let fields: Vec<&str> = line.split(',').collect();

        // A non-numeric 10th field marks a header or label row. This is the
        // only header detection the format allows.
        let Some(installs) = fields
            .get(INSTALLS_FIELD)
            .and_then(|f| parse_install_count(f))
        else {
            continue;
        };
        let code = fields.get(CODE_FIELD).copied().unwrap_or_default();

        // Saturating accumulation keeps the transform total even when the
        // log sums past u64::MAX.
        match devices_by_code.get_mut(code) {
            Some(device) => device.install_count = device.install_count.saturating_add(installs),
            None => {
                devices_by_code.insert(code.to_string(), unknown_device(code, installs));
            }
        }

        total_installs = total_installs.saturating_add(installs);
    }

    // Fold device counts into families. The synthetic Unknown key matches no
    // family, so unmatched installs drop out here rather than via a special
    // case.
    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, family) in families.iter_mut().enumerate() {
        family.install_count = 0;
        index.insert(family.key.clone(), i);
    }
    for device in devices_by_code.values() {
        if let Some(&i) = index.get(&device.family_key) {
            families[i].install_count =
                families[i].install_count.saturating_add(device.install_count);
        }
    }

    // The catalog lists every known device; only families actually seen in
    // the log survive the filter.
    let mut ranked_families: Vec<Family> = families
        .into_iter()
        .filter(|f| f.install_count > 0)
        .collect();
    // sort_by is stable, so equal counts keep catalog order.
    ranked_families.sort_by(|a, b| b.install_count.cmp(&a.install_count));

    AggregationResult {
        devices_by_code,
        total_installs,
        ranked_families,
    }
}

fn unknown_device(code: &str, installs: u64) -> Device {
    Device {
        code: code.to_string(),
        brand: UNKNOWN.to_string(),
        name: UNKNOWN.to_string(),
        model: UNKNOWN.to_string(),
        family_key: UNKNOWN.to_string(),
        install_count: installs,
    }
}

/// Permissive base-10 parse: leading whitespace is skipped, then a non-empty
/// ASCII digit prefix is taken and anything after it is ignored. `None` when
/// no digits are present (or the value overflows u64).
fn parse_install_count(field: &str) -> Option<u64> {
    let trimmed = field.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse().ok()
}
