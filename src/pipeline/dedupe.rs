use std::collections::HashSet;

use tracing::debug;

use crate::domain::FeatureRow;

/// Collapses printing variants: rows agreeing on
/// (name, attack_name, hp, ability_name) keep only their first occurrence.
///
/// "First" is defined by the table's current join order; this runs before
/// the output sort on purpose.
pub fn dedupe(rows: Vec<FeatureRow>) -> Vec<FeatureRow> {
    let total = rows.len();
    let mut seen = HashSet::new();
    let kept: Vec<FeatureRow> = rows
        .into_iter()
        .filter(|row| seen.insert(row.dedup_key()))
        .collect();

    debug!(total, kept = kept.len(), "dropped duplicate feature rows");
    kept
}
