use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::domain::Card;
use crate::error::Result;

const ENERGY_SUPERTYPE: &str = "Energy";

/// Parenthetical suffixes on reprint names, e.g. "Grass Energy (Special)".
static PARENTHETICAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(.*?\)").unwrap());

/// One row of the Energy companion table. The printed set number is kept as
/// text; promo numbering is not coercible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyRow {
    pub id: String,
    pub supertype: String,
    pub subtype: Option<String>,
    pub name: String,
    pub is_ace_spec: bool,
    pub rules: Option<String>,
    pub set_number: String,
    pub set_name: String,
}

/// Prepares the Energy-card companion table: Energy cards at or after the
/// minimum regulation marker, with cleaned names, their first subtype, and
/// an ACE SPEC flag, ordered descending by (name, subtypes).
pub fn prepare_energy(cards: &[Card], config: &PipelineConfig) -> Result<Vec<EnergyRow>> {
    let mut kept: Vec<(&Card, String)> = cards
        .iter()
        .filter(|card| card.supertype == ENERGY_SUPERTYPE)
        .filter(|card| {
            card.regulation_mark
                .as_deref()
                .is_some_and(|mark| mark >= config.min_regulation_mark.as_str())
        })
        .map(|card| (card, clean_name(&card.name)))
        .collect();

    // Descending (name, subtypes) order
    kept.sort_by(|a, b| (b.1.as_str(), &b.0.subtypes).cmp(&(a.1.as_str(), &a.0.subtypes)));

    let mut rows = Vec::with_capacity(kept.len());
    for (card, name) in kept {
        let rules = match &card.rules {
            Some(rules) => Some(serde_json::to_string(rules)?),
            None => None,
        };
        rows.push(EnergyRow {
            id: card.id.clone(),
            supertype: card.supertype.clone(),
            subtype: card.subtypes.first().cloned(),
            name,
            is_ace_spec: card.subtypes.iter().any(|s| s.contains("ACE SPEC")),
            rules,
            set_number: card.number.clone(),
            set_name: card.set.id.clone(),
        });
    }

    debug!(rows = rows.len(), "prepared energy table");
    Ok(rows)
}

fn clean_name(name: &str) -> String {
    PARENTHETICAL_RE.replace_all(name, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SetRef;
    use std::collections::BTreeMap;

    fn energy_card(id: &str, name: &str, subtypes: &[&str], mark: Option<&str>) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            supertype: "Energy".to_string(),
            subtypes: subtypes.iter().map(|s| s.to_string()).collect(),
            hp: None,
            types: Vec::new(),
            evolves_from: None,
            retreat_cost: None,
            abilities: None,
            attacks: None,
            rules: Some(vec!["Attach this card to 1 of your Pokémon.".to_string()]),
            legalities: BTreeMap::new(),
            regulation_mark: mark.map(str::to_string),
            set: SetRef {
                id: "sve".to_string(),
            },
            number: "9".to_string(),
        }
    }

    #[test]
    fn keeps_only_recent_energy_cards() {
        let mut pokemon = energy_card("sv1-1", "Sprigatito", &["Basic"], Some("G"));
        pokemon.supertype = "Pokémon".to_string();
        let cards = vec![
            pokemon,
            energy_card("sve-9", "Basic Psychic Energy", &["Basic"], Some("G")),
            energy_card("old-4", "Double Colorless Energy", &["Special"], Some("F")),
            energy_card("unmarked-2", "Fairy Energy", &["Basic"], None),
        ];
        let rows = prepare_energy(&cards, &PipelineConfig::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "sve-9");
    }

    #[test]
    fn parenthetical_name_suffixes_are_stripped() {
        let cards = vec![energy_card(
            "sve-10",
            "Grass Energy (Special Delivery)",
            &["Basic"],
            Some("G"),
        )];
        let rows = prepare_energy(&cards, &PipelineConfig::default()).unwrap();
        assert_eq!(rows[0].name, "Grass Energy");
    }

    #[test]
    fn ace_spec_flag_and_first_subtype() {
        let cards = vec![energy_card(
            "twm-167",
            "Legacy Energy",
            &["ACE SPEC", "Special"],
            Some("H"),
        )];
        let rows = prepare_energy(&cards, &PipelineConfig::default()).unwrap();
        assert!(rows[0].is_ace_spec);
        assert_eq!(rows[0].subtype.as_deref(), Some("ACE SPEC"));
        assert!(rows[0].rules.as_deref().unwrap().starts_with("["));
    }

    #[test]
    fn rows_are_ordered_descending_by_name() {
        let cards = vec![
            energy_card("a", "Jet Energy", &["Special"], Some("G")),
            energy_card("b", "Therapeutic Energy", &["Special"], Some("G")),
            energy_card("c", "Mist Energy", &["Special"], Some("H")),
        ];
        let rows = prepare_energy(&cards, &PipelineConfig::default()).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Therapeutic Energy", "Mist Energy", "Jet Energy"]);
    }
}
