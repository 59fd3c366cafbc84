//! Parser for PTCGL-exported plaintext decklists.
//!
//! Unrelated to the feature pipeline: no shared state, just a small
//! line-oriented grammar of section headers and card lines.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Shorthand basic-energy line, e.g. "8 Basic {P} Energy Energy 22".
static ENERGY_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s+Basic\s+\{([A-Z])\}\s+Energy").unwrap());

/// Regular card line, e.g. "3 Nest Ball SVI 181 PH". The trailing set code,
/// collector number, and optional variant marker are stripped.
static CARD_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s+(.*?)(?:\s+[A-Z]{2,}\s+\d+.*)?$").unwrap());

/// Single-letter energy shorthand used by PTCGL exports.
const ENERGY_SYMBOLS: &[(char, &str)] = &[
    ('P', "Psychic"),
    ('G', "Grass"),
    ('R', "Fire"),
    ('W', "Water"),
    ('L', "Lightning"),
    ('F', "Fighting"),
    ('D', "Darkness"),
    ('M', "Metal"),
    ('Y', "Fairy"),
    ('N', "Dragon"),
    ('C', "Colorless"),
];

/// Decklist section, set by the most recent header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Pokemon,
    Trainer,
    Energy,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Pokemon => write!(f, "Pokémon"),
            Section::Trainer => write!(f, "Trainer"),
            Section::Energy => write!(f, "Energy"),
        }
    }
}

/// Total copies and supertype for one canonical card name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub count: u32,
    pub supertype: Option<Section>,
}

/// Parses a decklist into a canonical-name → (count, supertype) mapping.
///
/// Repeated names accumulate their quantities. Lines before any section
/// header get no supertype; shorthand basic-energy lines are always typed
/// Energy regardless of section.
pub fn parse_decklist(deck_text: &str) -> HashMap<String, DeckEntry> {
    let mut deck: HashMap<String, DeckEntry> = HashMap::new();
    let mut current_section = None;

    for line in deck_text.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("Pokémon") {
            current_section = Some(Section::Pokemon);
            continue;
        } else if line.starts_with("Trainer") {
            current_section = Some(Section::Trainer);
            continue;
        } else if line.starts_with("Energy") {
            current_section = Some(Section::Energy);
            continue;
        }

        if let Some(caps) = ENERGY_LINE_RE.captures(line) {
            let symbol = caps[2].chars().next();
            if let Some(energy_type) = symbol.and_then(lookup_energy_symbol) {
                let quantity: u32 = caps[1].parse().unwrap_or(0);
                let name = format!("Basic {} Energy", energy_type);
                add_card(&mut deck, name, quantity, Some(Section::Energy));
                continue;
            }
            // Unknown symbol: fall through to the generic card line.
        }

        if let Some(caps) = CARD_LINE_RE.captures(line) {
            let quantity: u32 = caps[1].parse().unwrap_or(0);
            let name = caps[2].trim().to_string();
            if !name.is_empty() {
                add_card(&mut deck, name, quantity, current_section);
            }
        }
    }

    deck
}

fn lookup_energy_symbol(symbol: char) -> Option<&'static str> {
    ENERGY_SYMBOLS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, name)| *name)
}

fn add_card(
    deck: &mut HashMap<String, DeckEntry>,
    name: String,
    quantity: u32,
    supertype: Option<Section>,
) {
    let entry = deck.entry(name).or_insert(DeckEntry {
        count: 0,
        supertype: None,
    });
    entry.count += quantity;
    if supertype.is_some() {
        entry.supertype = supertype;
    }
}
