use std::collections::HashMap;

use tracing::debug;

use crate::domain::{AbilityEntry, AttackEntry, Card};

/// One pre-derivation output row: a card paired with at most one ability
/// entry and at most one attack entry.
#[derive(Debug, Clone)]
pub struct JoinedRow {
    pub card: Card,
    pub ability: Option<AbilityEntry>,
    pub attack: Option<AttackEntry>,
}

/// Left-joins the card table against both side tables on card id, via hash
/// maps keyed on the id.
///
/// The multiplicity is the contract here: a card with `a` ability entries
/// and `k` attack entries emits exactly `max(a, 1) × max(k, 1)` rows, every
/// distinct (ability, attack) pairing once, in side-table order. Cards with
/// no entries on a side survive with that side's columns null-filled.
pub fn join(
    cards: Vec<Card>,
    abilities: &[AbilityEntry],
    attacks: &[AttackEntry],
) -> Vec<JoinedRow> {
    let abilities_by_card = index_by_card(abilities, |entry| entry.card_id.as_str());
    let attacks_by_card = index_by_card(attacks, |entry| entry.card_id.as_str());

    let mut rows = Vec::new();
    for card in cards {
        let card_abilities: Vec<Option<&AbilityEntry>> = match abilities_by_card.get(card.id.as_str()) {
            Some(entries) => entries.iter().map(|e| Some(*e)).collect(),
            None => vec![None],
        };
        let card_attacks: Vec<Option<&AttackEntry>> = match attacks_by_card.get(card.id.as_str()) {
            Some(entries) => entries.iter().map(|e| Some(*e)).collect(),
            None => vec![None],
        };

        for ability in &card_abilities {
            for attack in &card_attacks {
                rows.push(JoinedRow {
                    card: card.clone(),
                    ability: ability.cloned(),
                    attack: attack.cloned(),
                });
            }
        }
    }

    debug!(rows = rows.len(), "joined side tables onto card table");
    rows
}

fn index_by_card<'e, T, F>(entries: &'e [T], key: F) -> HashMap<&'e str, Vec<&'e T>>
where
    F: Fn(&'e T) -> &'e str,
{
    let mut index: HashMap<&str, Vec<&T>> = HashMap::new();
    for entry in entries {
        index.entry(key(entry)).or_default().push(entry);
    }
    index
}
