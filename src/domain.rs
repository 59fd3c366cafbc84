use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A card ability as it appears inside the raw dataset's JSON-encoded
/// `abilities` cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AbilityData {
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
    /// Ability category (e.g. "Ability", "Poké-Body"). Decoded here but not
    /// carried into the side-table artifact.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A card attack as it appears inside the raw dataset's JSON-encoded
/// `attacks` cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttackData {
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
    /// Raw printed damage string, e.g. "120", "30+", "50×".
    #[serde(default)]
    pub damage: Option<String>,
    /// Structured energy cost, one symbol per required energy.
    #[serde(default)]
    pub cost: Vec<String>,
    #[serde(rename = "convertedEnergyCost", default)]
    pub converted_energy_cost: Option<u32>,
}

/// The nested set reference on a raw card. Only the set identifier matters
/// downstream; other keys in the object are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetRef {
    pub id: String,
}

/// A card after schema normalization: canonical snake_case field names,
/// irrelevant columns dropped, and every nested cell decoded into typed
/// values. Nothing downstream re-parses text into structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub supertype: String,
    pub subtypes: Vec<String>,
    pub hp: Option<u32>,
    pub types: Vec<String>,
    pub evolves_from: Option<String>,
    pub retreat_cost: Option<u32>,
    pub abilities: Option<Vec<AbilityData>>,
    pub attacks: Option<Vec<AttackData>>,
    pub rules: Option<Vec<String>>,
    pub legalities: BTreeMap<String, String>,
    pub regulation_mark: Option<String>,
    pub set: SetRef,
    pub number: String,
}

/// One row of the ability side table: one entry per (card, ability) pair.
/// `card_id` is a foreign key and deliberately not unique here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AbilityEntry {
    pub card_id: String,
    pub ability_name: String,
    pub ability_text: Option<String>,
}

/// One row of the attack side table: one entry per (card, attack) pair.
/// The cost list is kept as a JSON cell; it is carried through to the output
/// verbatim and never inspected again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttackEntry {
    pub card_id: String,
    pub attack_name: String,
    pub attack_text: Option<String>,
    pub attack_damage: Option<String>,
    pub attack_cost: String,
    pub attack_energy_cost: Option<u32>,
}

/// The pipeline's output unit: one row per surviving
/// (card × ability entry × attack entry) combination.
///
/// Field declaration order is the artifact's column order; do not reorder
/// without intending to change the output schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureRow {
    pub id: String,
    pub set_name: String,
    pub set_number: u32,
    pub supertype: String,
    pub name: String,
    pub stage: Option<String>,
    pub is_ex: bool,
    pub is_tera: bool,
    pub is_ancient: bool,
    pub is_future: bool,
    pub primary_type: Option<String>,
    pub evolves_from: Option<String>,
    pub hp: Option<u32>,
    pub ability_name: Option<String>,
    pub ability_text: Option<String>,
    pub attack_name: Option<String>,
    pub attack_text: Option<String>,
    pub attack_damage_amount: Option<u32>,
    pub attack_damage_modifier: Option<String>,
    pub attack_cost: Option<String>,
    pub cards_needed_for_attack: Option<u32>,
    pub attack_energy_cost: Option<u32>,
    pub is_coin_flip: bool,
    pub damage_per_energy: Option<f64>,
    pub retreat_cost: Option<u32>,
    pub prize_card_value: u32,
    pub setup_time: Option<u32>,
    pub is_immune_to_bench_damage: bool,
}

impl FeatureRow {
    /// Deduplication key: rows agreeing on all four fields are treated as
    /// printing variants of the same card.
    pub fn dedup_key(&self) -> (String, Option<String>, Option<u32>, Option<String>) {
        (
            self.name.clone(),
            self.attack_name.clone(),
            self.hp,
            self.ability_name.clone(),
        )
    }
}
