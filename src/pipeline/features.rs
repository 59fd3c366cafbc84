//! Isolated text-to-feature extractors.
//!
//! Every function here is pure and total: ambiguous or malformed input
//! resolves to the documented default (usually `None` or 1), never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// "takes N Prize" in rule text, case-sensitive; covers both "Prize card"
/// and "Prize cards".
static PRIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"takes (\d+) Prize").unwrap());

/// Leading digit run of a printed damage string.
static DAMAGE_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)").unwrap());

/// Damage modifier symbol anywhere in the printed damage string.
static DAMAGE_MODIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+\-×]").unwrap());

/// Rule text printed on bench-protection bodies, matched verbatim.
const BENCH_IMMUNITY_TEXT: &str =
    "As long as this Pokémon is on your Bench, prevent all damage done";

/// Classifies the evolutionary stage from the subtype list and returns the
/// stage label together with the number of turns needed to field the card.
///
/// Checked in fixed priority order: Basic, Stage 1, Stage 2. Anything else
/// (trainer subtypes, BREAK, V-UNION, ...) is unclassified.
pub fn extract_stage(subtypes: &[String]) -> (Option<&'static str>, Option<u32>) {
    for (label, setup_time) in [("Basic", 0), ("Stage 1", 1), ("Stage 2", 2)] {
        if subtypes.iter().any(|s| s.contains(label)) {
            return (Some(label), Some(setup_time));
        }
    }
    (None, None)
}

/// True when the literal marker substring appears in the subtype list.
pub fn has_subtype_marker(subtypes: &[String], marker: &str) -> bool {
    subtypes.iter().any(|s| s.contains(marker))
}

/// First element of the card's type list.
pub fn primary_type(types: &[String]) -> Option<String> {
    types.first().cloned()
}

/// Number of prize cards an opponent takes when this card is knocked out.
///
/// The first "takes N Prize" match across the rule lines decides; a capture
/// too large to hold defaults to 1 rather than deferring to later lines.
/// Missing rules or no match also default to 1.
pub fn extract_prize_value(rules: Option<&[String]>) -> u32 {
    let Some(rules) = rules else {
        return 1;
    };
    rules
        .iter()
        .find_map(|line| PRIZE_RE.captures(line))
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(1)
}

/// True when any rule line carries the bench-protection body text.
pub fn is_immune_to_bench_damage(rules: Option<&[String]>) -> bool {
    rules
        .map(|rules| rules.iter().any(|line| line.contains(BENCH_IMMUNITY_TEXT)))
        .unwrap_or(false)
}

/// Numeric damage amount: the leading digit run of the printed damage
/// string. "30+" parses to 30; "×" alone or empty text parses to nothing.
pub fn parse_damage_amount(damage: &str) -> Option<u32> {
    DAMAGE_AMOUNT_RE
        .captures(damage)
        .and_then(|caps| caps[1].parse().ok())
}

/// Damage modifier symbol (`+`, `-`, `×`) wherever it occurs. Independent of
/// the amount extraction; "30+" yields both an amount and a modifier.
pub fn parse_damage_modifier(damage: &str) -> Option<String> {
    DAMAGE_MODIFIER_RE
        .find(damage)
        .map(|m| m.as_str().to_string())
}

/// True when the attack text mentions a coin flip (case-sensitive).
pub fn is_coin_flip(attack_text: Option<&str>) -> bool {
    attack_text.map(|t| t.contains("coin")).unwrap_or(false)
}

/// Damage dealt per attached energy, rounded to two decimals. Undefined
/// (None) for free attacks rather than infinite.
pub fn damage_per_energy(amount: Option<u32>, energy_cost: Option<u32>) -> Option<f64> {
    let amount = amount?;
    let cost = energy_cost?;
    if cost == 0 {
        return None;
    }
    Some(round2(amount as f64 / cost as f64))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
