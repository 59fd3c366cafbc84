use tracing::debug;

use crate::domain::FeatureRow;
use crate::error::{PipelineError, Result};
use crate::pipeline::features;
use crate::pipeline::join::JoinedRow;

const STAGE: &str = "derive";

/// Computes the derived feature columns for every joined row.
///
/// All derivations are stateless and column-wise. Per-row parse ambiguity
/// (missing damage text, unmatched prize text) resolves to its documented
/// default; only a non-numeric printed set number is fatal.
pub fn derive(rows: Vec<JoinedRow>) -> Result<Vec<FeatureRow>> {
    let out: Result<Vec<FeatureRow>> = rows.into_iter().map(derive_row).collect();
    let out = out?;
    debug!(rows = out.len(), "derived feature columns");
    Ok(out)
}

fn derive_row(row: JoinedRow) -> Result<FeatureRow> {
    let card = row.card;

    let set_number: u32 = card.number.parse().map_err(|_| {
        PipelineError::schema(
            STAGE,
            format!(
                "card `{}` has non-numeric set number `{}`",
                card.id, card.number
            ),
        )
    })?;

    let (stage, setup_time) = features::extract_stage(&card.subtypes);

    let ability_name = row.ability.as_ref().map(|a| a.ability_name.clone());
    let ability_text = row.ability.as_ref().and_then(|a| a.ability_text.clone());

    let attack = row.attack.as_ref();
    let attack_damage_amount = attack
        .and_then(|a| a.attack_damage.as_deref())
        .and_then(features::parse_damage_amount);
    let attack_damage_modifier = attack
        .and_then(|a| a.attack_damage.as_deref())
        .and_then(features::parse_damage_modifier);
    let attack_energy_cost = attack.and_then(|a| a.attack_energy_cost);

    let cards_needed_for_attack = match (setup_time, attack_energy_cost) {
        (Some(setup), Some(energy)) => Some(setup + energy),
        _ => None,
    };

    Ok(FeatureRow {
        id: card.id,
        set_name: card.set.id,
        set_number,
        supertype: card.supertype,
        name: card.name,
        stage: stage.map(str::to_string),
        is_ex: features::has_subtype_marker(&card.subtypes, "ex"),
        is_tera: features::has_subtype_marker(&card.subtypes, "Tera"),
        is_ancient: features::has_subtype_marker(&card.subtypes, "Ancient"),
        is_future: features::has_subtype_marker(&card.subtypes, "Future"),
        primary_type: features::primary_type(&card.types),
        evolves_from: card.evolves_from,
        hp: card.hp,
        ability_name,
        ability_text,
        attack_name: attack.map(|a| a.attack_name.clone()),
        attack_text: attack.and_then(|a| a.attack_text.clone()),
        attack_damage_amount,
        attack_damage_modifier,
        attack_cost: attack.map(|a| a.attack_cost.clone()),
        cards_needed_for_attack,
        attack_energy_cost,
        is_coin_flip: features::is_coin_flip(attack.and_then(|a| a.attack_text.as_deref())),
        damage_per_energy: features::damage_per_energy(attack_damage_amount, attack_energy_cost),
        retreat_cost: card.retreat_cost,
        prize_card_value: features::extract_prize_value(card.rules.as_deref()),
        setup_time,
        is_immune_to_bench_damage: features::is_immune_to_bench_damage(card.rules.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttackEntry, Card, SetRef};
    use std::collections::BTreeMap;

    fn card() -> Card {
        Card {
            id: "sv4-12".to_string(),
            name: "Test ex".to_string(),
            supertype: "Pokémon".to_string(),
            subtypes: vec!["Stage 1".to_string(), "Tera".to_string(), "ex".to_string()],
            hp: Some(260),
            types: vec!["Water".to_string(), "Fighting".to_string()],
            evolves_from: Some("Testling".to_string()),
            retreat_cost: Some(2),
            abilities: None,
            attacks: None,
            rules: Some(vec![
                "When your Tera Pokémon is Knocked Out, your opponent takes 2 Prize cards."
                    .to_string(),
                "As long as this Pokémon is on your Bench, prevent all damage done to it by attacks.".to_string(),
            ]),
            legalities: BTreeMap::new(),
            regulation_mark: Some("G".to_string()),
            set: SetRef {
                id: "sv4".to_string(),
            },
            number: "12".to_string(),
        }
    }

    fn attack_entry() -> AttackEntry {
        AttackEntry {
            card_id: "sv4-12".to_string(),
            attack_name: "Torrent Blade".to_string(),
            attack_text: Some("Flip a coin. If heads, discard an Energy.".to_string()),
            attack_damage: Some("140+".to_string()),
            attack_cost: r#"["Water","Water","Colorless"]"#.to_string(),
            attack_energy_cost: Some(3),
        }
    }

    #[test]
    fn derives_full_feature_row() {
        let rows = derive(vec![JoinedRow {
            card: card(),
            ability: None,
            attack: Some(attack_entry()),
        }])
        .unwrap();
        let row = &rows[0];

        assert_eq!(row.set_name, "sv4");
        assert_eq!(row.set_number, 12);
        assert_eq!(row.stage.as_deref(), Some("Stage 1"));
        assert_eq!(row.setup_time, Some(1));
        assert!(row.is_ex);
        assert!(row.is_tera);
        assert!(!row.is_ancient);
        assert_eq!(row.primary_type.as_deref(), Some("Water"));
        assert_eq!(row.prize_card_value, 2);
        assert!(row.is_immune_to_bench_damage);
        assert_eq!(row.attack_damage_amount, Some(140));
        assert_eq!(row.attack_damage_modifier.as_deref(), Some("+"));
        assert_eq!(row.cards_needed_for_attack, Some(4));
        assert!(row.is_coin_flip);
        assert_eq!(row.damage_per_energy, Some(46.67));
        assert!(row.ability_name.is_none());
    }

    #[test]
    fn null_attack_side_propagates() {
        let rows = derive(vec![JoinedRow {
            card: card(),
            ability: None,
            attack: None,
        }])
        .unwrap();
        let row = &rows[0];
        assert!(row.attack_name.is_none());
        assert!(row.attack_damage_amount.is_none());
        assert!(row.cards_needed_for_attack.is_none());
        assert!(row.damage_per_energy.is_none());
        assert!(!row.is_coin_flip);
    }

    #[test]
    fn non_numeric_set_number_is_fatal() {
        let mut bad = card();
        bad.number = "TG12".to_string();
        let err = derive(vec![JoinedRow {
            card: bad,
            ability: None,
            attack: None,
        }])
        .unwrap_err();
        assert!(err.to_string().contains("TG12"));
    }
}
