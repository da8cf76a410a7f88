use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter, EnumString};

/// Elemental type carried by moves and combatants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    EnumCount,
)]
#[strum(ascii_case_insensitive)]
pub enum ElementType {
    Fire,
    Water,
    Electric,
    Grass,
    Psychic,
    Ice,
    Fairy,
    Normal,
    Rock,
    Flying,
    Poison,
    Fighting,
    Dragon,
    Dark,
    Ground,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ElementType {
    /// The four glyphs an attack of this element cycles through while animating.
    /// The first glyph doubles as the element's badge.
    pub fn glyphs(self) -> [&'static str; 4] {
        use ElementType::*;

        match self {
            Fire => ["🔥", "✨", "🔥", "💥"],
            Water => ["💧", "🌊", "💧", "✨"],
            Electric => ["⚡️", "⚡️", "✨", "⚡️"],
            Grass => ["🍃", "🌱", "✨", "🍃"],
            Psychic => ["🔮", "✨", "💫", "🔮"],
            Ice => ["❄️", "✨", "❄️", "💎"],
            Fairy => ["✨", "🌸", "⭐️", "✨"],
            Normal => ["✨", "💫", "✨", "💥"],
            Rock => ["🪨", "✨", "💥", "🪨"],
            Flying => ["🕊️", "✨", "💨", "🕊️"],
            Poison => ["☠️", "💜", "☂️", "☠️"],
            Fighting => ["🥊", "💥", "✨", "🥊"],
            Dragon => ["🐉", "🔥", "✨", "🐉"],
            Dark => ["🌑", "💫", "✨", "🌙"],
            Ground => ["🌋", "🪨", "✨", "🌋"],
        }
    }

    pub fn badge(self) -> &'static str {
        self.glyphs()[0]
    }
}
