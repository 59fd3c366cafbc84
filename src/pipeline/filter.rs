use tracing::debug;

use crate::config::PipelineConfig;
use crate::domain::Card;

/// A card with its target-format legality status pulled out of the decoded
/// legality map.
#[derive(Debug, Clone, PartialEq)]
struct ScreenedCard {
    card: Card,
    standard_legality: Option<String>,
}

/// Extracts the configured format's legality status for each card.
fn screen(cards: Vec<Card>, config: &PipelineConfig) -> Vec<ScreenedCard> {
    cards
        .into_iter()
        .map(|card| {
            let standard_legality = card.legalities.get(&config.legal_format).cloned();
            ScreenedCard {
                card,
                standard_legality,
            }
        })
        .collect()
}

/// Keeps cards that are tournament-legal in the configured format, printed at
/// or after the minimum regulation marker, and of the target supertype.
///
/// Marker comparison is lexicographic on the single-letter regulation marks;
/// later letters denote more recent legal sets. An empty result is valid.
pub fn apply(cards: Vec<Card>, config: &PipelineConfig) -> Vec<Card> {
    let total = cards.len();
    let kept: Vec<Card> = screen(cards, config)
        .into_iter()
        .filter(|screened| {
            screened.standard_legality.as_deref() == Some("Legal")
                && screened
                    .card
                    .regulation_mark
                    .as_deref()
                    .is_some_and(|mark| mark >= config.min_regulation_mark.as_str())
                && screened.card.supertype == config.target_supertype
        })
        .map(|screened| screened.card)
        .collect();

    debug!(total, kept = kept.len(), "applied legality and supertype filter");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SetRef;
    use std::collections::BTreeMap;

    fn card(id: &str, supertype: &str, mark: Option<&str>, standard: Option<&str>) -> Card {
        let mut legalities = BTreeMap::new();
        if let Some(status) = standard {
            legalities.insert("standard".to_string(), status.to_string());
        }
        Card {
            id: id.to_string(),
            name: id.to_string(),
            supertype: supertype.to_string(),
            subtypes: vec!["Basic".to_string()],
            hp: Some(70),
            types: vec!["Grass".to_string()],
            evolves_from: None,
            retreat_cost: Some(1),
            abilities: None,
            attacks: None,
            rules: None,
            legalities,
            regulation_mark: mark.map(str::to_string),
            set: SetRef {
                id: "sv1".to_string(),
            },
            number: "1".to_string(),
        }
    }

    #[test]
    fn keeps_only_legal_recent_pokemon() {
        let config = PipelineConfig::default();
        let cards = vec![
            card("keep-g", "Pokémon", Some("G"), Some("Legal")),
            card("keep-h", "Pokémon", Some("H"), Some("Legal")),
            card("old-mark", "Pokémon", Some("F"), Some("Legal")),
            card("banned", "Pokémon", Some("G"), Some("Banned")),
            card("no-legality", "Pokémon", Some("G"), None),
            card("no-mark", "Pokémon", None, Some("Legal")),
            card("trainer", "Trainer", Some("G"), Some("Legal")),
        ];

        let kept = apply(cards, &config);
        let ids: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["keep-g", "keep-h"]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let config = PipelineConfig::default();
        let kept = apply(vec![card("x", "Energy", Some("A"), Some("Legal"))], &config);
        assert!(kept.is_empty());
    }

    #[test]
    fn marker_comparison_is_lexicographic() {
        let mut config = PipelineConfig::default();
        config.min_regulation_mark = "H".to_string();
        let kept = apply(
            vec![
                card("g", "Pokémon", Some("G"), Some("Legal")),
                card("h", "Pokémon", Some("H"), Some("Legal")),
                card("i", "Pokémon", Some("I"), Some("Legal")),
            ],
            &config,
        );
        let ids: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["h", "i"]);
    }
}
