// src/report.rs
//! Rendering of aggregation results: ranked rows with running totals and
//! truncated percentages, printed as a console table or serialized to JSON.

use crate::aggregate::AggregationResult;
use crate::catalog::Family;
use colored::Colorize;
use serde::Serialize;

/// One rendered row of the ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub brand: String,
    /// Unique member device names in catalog order, joined with `", "`.
    pub devices: String,
    pub installs: u64,
    pub running_total: u64,
    /// `floor(running_total / total_installs * 100)`; 0 when the total is 0.
    pub running_pct: u64,
}

/// The full presentation-layer view of an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total_installs: u64,
    pub rows: Vec<RankedRow>,
}

impl Report {
    /// Builds display rows from a ranked aggregation: 1-based ranks, prefix
    /// sums, and truncating percentages of the grand total.
    #[must_use]
    pub fn build(result: &AggregationResult) -> Self {
        let mut rows = Vec::with_capacity(result.ranked_families.len());
        let mut running_total: u64 = 0;

        for (i, family) in result.ranked_families.iter().enumerate() {
            running_total = running_total.saturating_add(family.install_count);
            rows.push(RankedRow {
                rank: i + 1,
                brand: family.brand.clone(),
                devices: member_label(family, result),
                installs: family.install_count,
                running_total,
                running_pct: percentage(running_total, result.total_installs),
            });
        }

        Self {
            total_installs: result.total_installs,
            rows,
        }
    }

    /// Installs attributed to codes outside the catalog (or to families that
    /// were trimmed from the rows by a display limit).
    #[must_use]
    pub fn unranked_installs(&self) -> u64 {
        let ranked = self.rows.last().map_or(0, |r| r.running_total);
        self.total_installs.saturating_sub(ranked)
    }
}

/// Joins the family's member device names, deduplicated by the resolved
/// device's family key (first occurrence wins, catalog order preserved).
/// Distinct names only surface when a repeated code was overwritten by a row
/// from another family.
fn member_label(family: &Family, result: &AggregationResult) -> String {
    let mut seen: Vec<&str> = Vec::new();
    let mut names: Vec<&str> = Vec::new();

    for code in &family.member_codes {
        let Some(device) = result.devices_by_code.get(code) else {
            continue;
        };
        if seen.contains(&device.family_key.as_str()) {
            continue;
        }
        seen.push(device.family_key.as_str());
        names.push(device.name.as_str());
    }

    names.join(", ")
}

// Widened to u128 so counts near u64::MAX cannot overflow the product.
fn percentage(running_total: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        let pct = u128::from(running_total) * 100 / u128::from(total);
        u64::try_from(pct).unwrap_or(u64::MAX)
    }
}

/// Prints the ranked table to stdout.
pub fn print_table(report: &Report) {
    if report.rows.is_empty() {
        println!(
            "{} No installs matched the catalog (total parsed: {}).",
            "~".yellow().bold(),
            report.total_installs
        );
        return;
    }

    println!(
        "{}",
        format!(
            "{:<6} {:<16} {:<36} {:>10} {:>14} {:>10}",
            "Rank", "Brand", "Devices", "Installs", "Running total", "Running %"
        )
        .bold()
    );

    for row in &report.rows {
        println!(
            "{:<6} {:<16} {:<36} {:>10} {:>14} {:>10}",
            row.rank, row.brand, row.devices, row.installs, row.running_total, row.running_pct
        );
    }

    let mut summary = format!("Total installs: {}", report.total_installs);
    let unranked = report.unranked_installs();
    if unranked > 0 {
        summary.push_str(&format!(" ({unranked} outside the ranked families)"));
    }
    println!("{}", summary.dimmed());
}

/// Serializes the report as pretty-printed JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
