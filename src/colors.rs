//! Table d'affichage couleur par code de vacation, entièrement hors du
//! générateur : les consommateurs (export tableur) s'en servent, la
//! génération l'ignore.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Couleurs d'une cellule : fond et texte, hex sans `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftColor {
    pub bg: String,
    pub text: String,
}

impl ShiftColor {
    fn new(bg: &str, text: &str) -> Self {
        Self {
            bg: bg.to_owned(),
            text: text.to_owned(),
        }
    }
}

/// Table par défaut, alignée sur la grille de référence.
pub fn default_colors() -> BTreeMap<String, ShiftColor> {
    let mut table = BTreeMap::new();
    table.insert("7".to_owned(), ShiftColor::new("FF6666", "000000")); // matin
    table.insert("15".to_owned(), ShiftColor::new("009933", "FFFFFF")); // après-midi
    table.insert("23".to_owned(), ShiftColor::new("3366CC", "FFFFFF")); // nuit
    table.insert("9".to_owned(), ShiftColor::new("FFFF66", "000000"));
    table.insert("11".to_owned(), ShiftColor::new("6699FF", "000000"));
    table.insert("12".to_owned(), ShiftColor::new("9966CC", "FFFFFF"));
    table.insert("8".to_owned(), ShiftColor::new("FF9999", "000000"));
    table.insert("16".to_owned(), ShiftColor::new("CC0033", "FFFFFF"));
    table.insert("0".to_owned(), ShiftColor::new("FF9999", "B91C1C")); // repos
    table.insert("V".to_owned(), ShiftColor::new("663399", "FFFFFF")); // congés
    table.insert("L".to_owned(), ShiftColor::new("CC6600", "FFFFFF")); // absence
    table
}

/// Fusionne les surcharges d'une requête sur la table par défaut
/// (la surcharge gagne).
pub fn merged(custom: &BTreeMap<String, ShiftColor>) -> BTreeMap<String, ShiftColor> {
    let mut table = default_colors();
    for (code, color) in custom {
        table.insert(code.clone(), color.clone());
    }
    table
}
