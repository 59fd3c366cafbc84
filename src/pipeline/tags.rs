//! Keyword tagging for Trainer cards.
//!
//! Tags are coarse mechanic labels derived from rule text plus energy-type
//! mentions in the card name, for grouping Trainer cards by what they do.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Card;
use crate::error::Result;

const TRAINER_SUPERTYPE: &str = "Trainer";

/// Mechanic tag → the lower-cased rule-text keywords that imply it.
/// Iterated in order, so tag output order is fixed.
const MECHANIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("search", &["search your deck", "look for", "reveal a card"]),
    ("draw", &["draw", "cards from your deck"]),
    ("switch", &["switch", "swap"]),
    ("evolve", &["evolve", "evolution"]),
    ("heal", &["heal", "remove damage"]),
    ("discard", &["discard", "put in the discard pile"]),
    ("energy_accel", &["attach", "energy", "basic energy", "accelerate"]),
];

const ENERGY_TYPES: &[&str] = &[
    "Grass",
    "Fire",
    "Water",
    "Lightning",
    "Psychic",
    "Fighting",
    "Darkness",
    "Metal",
    "Fairy",
    "Dragon",
    "Colorless",
];

/// One row of the Trainer tag table. Both tag lists are JSON cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerTagRow {
    pub id: String,
    pub name: String,
    pub mechanic_tags: String,
    pub energy_type_tags: String,
}

/// Mechanic tags implied by the card's rule text, matched case-insensitively.
pub fn mechanic_tags(rules: Option<&[String]>) -> Vec<&'static str> {
    let Some(rules) = rules else {
        return Vec::new();
    };
    let lowered = rules.join(" ").to_lowercase();
    MECHANIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(tag, _)| *tag)
        .collect()
}

/// Energy types mentioned in the card name, matched case-insensitively.
pub fn energy_type_tags(name: &str) -> Vec<&'static str> {
    let lowered = name.to_lowercase();
    ENERGY_TYPES
        .iter()
        .filter(|energy_type| lowered.contains(&energy_type.to_lowercase()))
        .copied()
        .collect()
}

/// Tags every Trainer card in the normalized table.
pub fn tag_trainers(cards: &[Card]) -> Result<Vec<TrainerTagRow>> {
    let mut rows = Vec::new();
    for card in cards.iter().filter(|c| c.supertype == TRAINER_SUPERTYPE) {
        rows.push(TrainerTagRow {
            id: card.id.clone(),
            name: card.name.clone(),
            mechanic_tags: serde_json::to_string(&mechanic_tags(card.rules.as_deref()))?,
            energy_type_tags: serde_json::to_string(&energy_type_tags(&card.name))?,
        });
    }
    debug!(rows = rows.len(), "tagged trainer cards");
    Ok(rows)
}
