//! Accent palettes for particle colors.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// A named pair of accent colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Indigo,
    Ocean,
    Ember,
    Forest,
    Mono,
}

impl Palette {
    /// Cycle to the next palette.
    pub fn next(self) -> Self {
        match self {
            Palette::Indigo => Palette::Ocean,
            Palette::Ocean => Palette::Ember,
            Palette::Ember => Palette::Forest,
            Palette::Forest => Palette::Mono,
            Palette::Mono => Palette::Indigo,
        }
    }

    /// The primary accent. Connecting lines are stroked in this color.
    pub fn primary(self) -> Rgb {
        match self {
            Palette::Indigo => Rgb::new(0x63, 0x66, 0xf1),
            Palette::Ocean => Rgb::new(0x06, 0xb6, 0xd4),
            Palette::Ember => Rgb::new(0xf9, 0x73, 0x16),
            Palette::Forest => Rgb::new(0x22, 0xc5, 0x5e),
            Palette::Mono => Rgb::new(0xe5, 0xe7, 0xeb),
        }
    }

    /// The secondary accent.
    pub fn secondary(self) -> Rgb {
        match self {
            Palette::Indigo => Rgb::new(0xec, 0x48, 0x99),
            Palette::Ocean => Rgb::new(0x3b, 0x82, 0xf6),
            Palette::Ember => Rgb::new(0xef, 0x44, 0x44),
            Palette::Forest => Rgb::new(0x84, 0xcc, 0x16),
            Palette::Mono => Rgb::new(0x9c, 0xa3, 0xaf),
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Palette::Indigo => "indigo",
            Palette::Ocean => "ocean",
            Palette::Ember => "ember",
            Palette::Forest => "forest",
            Palette::Mono => "mono",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let mut palette = Palette::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(palette);
            palette = palette.next();
        }
        assert_eq!(palette, Palette::Indigo);
        assert_eq!(seen.len(), 5);
        assert!(seen.iter().enumerate().all(|(i, p)| !seen[i + 1..].contains(p)));
    }

    #[test]
    fn test_accents_differ() {
        for palette in [
            Palette::Indigo,
            Palette::Ocean,
            Palette::Ember,
            Palette::Forest,
            Palette::Mono,
        ] {
            assert_ne!(palette.primary(), palette.secondary(), "{}", palette.name());
        }
    }
}
