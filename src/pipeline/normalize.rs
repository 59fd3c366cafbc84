use std::collections::{BTreeMap, HashMap};

use csv::StringRecord;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::acquire::RawTable;
use crate::domain::{AbilityData, AttackData, Card, SetRef};
use crate::error::{PipelineError, Result};

const STAGE: &str = "normalize";

/// Columns with no bearing on synergy analysis, dropped before anything else
/// looks at the table. Names are the lower-cased raw header names.
const DROPPED_COLUMNS: &[&str] = &[
    "artist",
    "ancienttrait",
    "cardmarket",
    "flavortext",
    "images",
    "nationalpokedexnumbers",
    "rarity",
    "retreatcost",
    "tcgplayer",
    "resistances",
    "weaknesses",
];

/// Raw (lower-cased) header name → canonical column name.
const RENAMED_COLUMNS: &[(&str, &str)] = &[
    ("evolvesfrom", "evolves_from"),
    ("convertedretreatcost", "retreat_cost"),
    ("regulationmark", "regulation_mark"),
];

/// Canonical columns the rest of the pipeline depends on. A raw dataset
/// missing any of these is rejected with a schema-mismatch error naming the
/// column.
const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "supertype",
    "subtypes",
    "hp",
    "types",
    "evolves_from",
    "retreat_cost",
    "abilities",
    "attacks",
    "rules",
    "legalities",
    "regulation_mark",
    "set",
    "number",
];

/// Normalizes the raw table into typed cards: lower-cases and renames the
/// header row to the canonical schema, drops irrelevant columns, and decodes
/// every JSON-encoded nested cell exactly once.
pub fn normalize(raw: &RawTable) -> Result<Vec<Card>> {
    let columns = canonical_columns(&raw.headers)?;

    let mut cards = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        cards.push(card_from_row(row, &columns)?);
    }

    debug!(cards = cards.len(), "normalized raw card table");
    Ok(cards)
}

/// Maps each canonical column name to its position in the raw header row,
/// verifying that every required column is present.
fn canonical_columns(headers: &[String]) -> Result<HashMap<String, usize>> {
    let mut columns = HashMap::new();
    for (index, header) in headers.iter().enumerate() {
        let lowered = header.to_lowercase();
        if DROPPED_COLUMNS.contains(&lowered.as_str()) {
            continue;
        }
        let canonical = RENAMED_COLUMNS
            .iter()
            .find(|(raw, _)| *raw == lowered)
            .map(|(_, canonical)| canonical.to_string())
            .unwrap_or(lowered);
        columns.insert(canonical, index);
    }

    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(*required) {
            return Err(PipelineError::schema(
                STAGE,
                format!("required column `{}` is missing", required),
            ));
        }
    }
    Ok(columns)
}

fn card_from_row(row: &StringRecord, columns: &HashMap<String, usize>) -> Result<Card> {
    let id = required_cell(row, columns, "id")?;

    let mut subtypes: Vec<String> = json_cell(row, columns, "subtypes")?.unwrap_or_default();
    // Deterministic representation regardless of printed order
    subtypes.sort();

    let legalities: BTreeMap<String, String> =
        json_cell(row, columns, "legalities")?.unwrap_or_default();

    let set: SetRef = json_cell(row, columns, "set")?.ok_or_else(|| {
        PipelineError::schema(STAGE, format!("card `{}` has no set reference", id))
    })?;

    let abilities: Option<Vec<AbilityData>> = json_cell(row, columns, "abilities")?;
    let attacks: Option<Vec<AttackData>> = json_cell(row, columns, "attacks")?;
    let rules: Option<Vec<String>> = json_cell(row, columns, "rules")?;

    Ok(Card {
        name: required_cell(row, columns, "name")?,
        supertype: required_cell(row, columns, "supertype")?,
        subtypes,
        hp: numeric_cell(row, columns, "hp"),
        types: json_cell(row, columns, "types")?.unwrap_or_default(),
        evolves_from: optional_cell(row, columns, "evolves_from"),
        retreat_cost: numeric_cell(row, columns, "retreat_cost"),
        abilities,
        attacks,
        rules,
        legalities,
        regulation_mark: optional_cell(row, columns, "regulation_mark"),
        set,
        number: required_cell(row, columns, "number")?,
        id,
    })
}

fn cell<'r>(row: &'r StringRecord, columns: &HashMap<String, usize>, name: &str) -> &'r str {
    columns
        .get(name)
        .and_then(|&index| row.get(index))
        .unwrap_or("")
        .trim()
}

fn required_cell(
    row: &StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Result<String> {
    let value = cell(row, columns, name);
    if value.is_empty() {
        return Err(PipelineError::schema(
            STAGE,
            format!("column `{}` has an empty value", name),
        ));
    }
    Ok(value.to_string())
}

fn optional_cell(
    row: &StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Option<String> {
    let value = cell(row, columns, name);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Lenient numeric read: integer, or float truncated toward zero (the raw
/// export writes retreat costs as "2.0"), or absent.
fn numeric_cell(row: &StringRecord, columns: &HashMap<String, usize>, name: &str) -> Option<u32> {
    let value = cell(row, columns, name);
    if value.is_empty() {
        return None;
    }
    value
        .parse::<u32>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().map(|f| f as u32))
}

/// Decodes a JSON-encoded nested cell. An empty cell is `None`; malformed
/// JSON in a non-empty cell is a fatal schema mismatch naming the column.
fn json_cell<T: DeserializeOwned>(
    row: &StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Result<Option<T>> {
    let value = cell(row, columns, name);
    if value.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(value).map(Some).map_err(|e| {
        PipelineError::schema(STAGE, format!("column `{}` is not valid JSON: {}", name, e))
    })
}
