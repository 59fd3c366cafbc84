use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::{AbilityEntry, AttackEntry, Card};
use crate::error::Result;

/// Explodes each card's ability list into one row per (card, ability) pair.
/// Cards without an ability list contribute nothing.
pub fn ability_entries(cards: &[Card]) -> Vec<AbilityEntry> {
    let mut entries = Vec::new();
    for card in cards {
        let Some(abilities) = &card.abilities else {
            continue;
        };
        for ability in abilities {
            entries.push(AbilityEntry {
                card_id: card.id.clone(),
                ability_name: ability.name.clone(),
                ability_text: non_empty(ability.text.clone()),
            });
        }
    }
    entries
}

/// Explodes each card's attack list into one row per (card, attack) pair.
/// The structured cost list is frozen into a JSON cell here; downstream
/// stages carry it verbatim.
pub fn attack_entries(cards: &[Card]) -> Result<Vec<AttackEntry>> {
    let mut entries = Vec::new();
    for card in cards {
        let Some(attacks) = &card.attacks else {
            continue;
        };
        for attack in attacks {
            entries.push(AttackEntry {
                card_id: card.id.clone(),
                attack_name: attack.name.clone(),
                attack_text: non_empty(attack.text.clone()),
                attack_damage: non_empty(attack.damage.clone()),
                attack_cost: serde_json::to_string(&attack.cost)?,
                attack_energy_cost: attack.converted_energy_cost,
            });
        }
    }
    Ok(entries)
}

/// The raw data prints free attacks and vanilla abilities with empty text.
/// An empty CSV cell reads back as absent, so absence is canonical.
fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

/// Persists a side table as a CSV artifact so ability/attack data can be
/// consumed independently of the card pipeline.
pub fn write_side_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(rows = rows.len(), path = %path.display(), "wrote side table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AbilityData, AttackData, SetRef};
    use std::collections::BTreeMap;

    fn card_with(
        id: &str,
        abilities: Option<Vec<AbilityData>>,
        attacks: Option<Vec<AttackData>>,
    ) -> Card {
        Card {
            id: id.to_string(),
            name: id.to_string(),
            supertype: "Pokémon".to_string(),
            subtypes: vec!["Basic".to_string()],
            hp: Some(120),
            types: vec!["Water".to_string()],
            evolves_from: None,
            retreat_cost: Some(2),
            abilities,
            attacks,
            rules: None,
            legalities: BTreeMap::new(),
            regulation_mark: Some("G".to_string()),
            set: SetRef {
                id: "sv2".to_string(),
            },
            number: "22".to_string(),
        }
    }

    fn ability(name: &str) -> AbilityData {
        AbilityData {
            name: name.to_string(),
            text: Some(format!("{} text", name)),
            kind: Some("Ability".to_string()),
        }
    }

    fn attack(name: &str, cost: &[&str]) -> AttackData {
        AttackData {
            name: name.to_string(),
            text: None,
            damage: Some("30".to_string()),
            cost: cost.iter().map(|c| c.to_string()).collect(),
            converted_energy_cost: Some(cost.len() as u32),
        }
    }

    #[test]
    fn one_entry_per_list_element_keyed_by_card() {
        let cards = vec![
            card_with("a", Some(vec![ability("One"), ability("Two")]), None),
            card_with("b", None, None),
            card_with("c", Some(vec![ability("Three")]), None),
        ];
        let entries = ability_entries(&cards);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].card_id, "a");
        assert_eq!(entries[1].card_id, "a");
        assert_eq!(entries[1].ability_name, "Two");
        assert_eq!(entries[2].card_id, "c");
    }

    #[test]
    fn attack_cost_is_frozen_as_json() {
        let cards = vec![card_with(
            "a",
            None,
            Some(vec![attack("Surf", &["Water", "Colorless"])]),
        )];
        let entries = attack_entries(&cards).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].attack_cost, r#"["Water","Colorless"]"#);
        assert_eq!(entries[0].attack_energy_cost, Some(2));
    }

    #[test]
    fn empty_text_is_canonicalized_to_absent() {
        let mut vanilla = ability("Plain");
        vanilla.text = Some(String::new());
        let cards = vec![card_with("a", Some(vec![vanilla]), None)];
        assert_eq!(ability_entries(&cards)[0].ability_text, None);
    }

    #[test]
    fn absent_lists_contribute_no_rows() {
        let cards = vec![card_with("a", None, None)];
        assert!(ability_entries(&cards).is_empty());
        assert!(attack_entries(&cards).unwrap().is_empty());
    }
}
