use crate::{foundation::core::Rgb8, stats::record::StatKind};

/// Selectable palette names. Anything unrecognized resolves to [`ThemeName::Default`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeName {
    /// Habitica purple.
    #[default]
    Default,
    /// Near-black background.
    Dark,
    /// GitHub-style white background.
    Light,
}

impl ThemeName {
    /// Lenient, case-insensitive lookup; unknown names fall back to `Default`.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => ThemeName::Dark,
            "light" => ThemeName::Light,
            _ => ThemeName::Default,
        }
    }

    /// Canonical query value.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
        }
    }
}

/// Background and text colors. Stat colors and bar geometry are not themeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Which palette this is.
    pub name: ThemeName,
    /// Canvas fill.
    pub background: Rgb8,
    /// Title text.
    pub primary_text: Rgb8,
    /// Subtitle, labels and readouts.
    pub secondary_text: Rgb8,
}

impl Theme {
    /// `default` palette.
    pub const DEFAULT: Theme = Theme {
        name: ThemeName::Default,
        background: Rgb8::new(0x2D, 0x1B, 0x47),
        primary_text: Rgb8::new(0xFF, 0xFF, 0xFF),
        secondary_text: Rgb8::new(0xD3, 0xD3, 0xD3),
    };

    /// `dark` palette.
    pub const DARK: Theme = Theme {
        name: ThemeName::Dark,
        background: Rgb8::new(0x0F, 0x0F, 0x23),
        primary_text: Rgb8::new(0xCC, 0xCC, 0xCC),
        secondary_text: Rgb8::new(0x99, 0x99, 0x99),
    };

    /// `light` palette.
    pub const LIGHT: Theme = Theme {
        name: ThemeName::Light,
        background: Rgb8::new(0xFF, 0xFF, 0xFF),
        primary_text: Rgb8::new(0x24, 0x29, 0x2E),
        secondary_text: Rgb8::new(0x58, 0x60, 0x69),
    };

    /// Palette for a name.
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::DEFAULT,
            ThemeName::Dark => Self::DARK,
            ThemeName::Light => Self::LIGHT,
        }
    }

    /// Shorthand for `Theme::named(ThemeName::parse_lossy(s))`.
    pub fn resolve(s: &str) -> Self {
        Self::named(ThemeName::parse_lossy(s))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fixed colors shared by every theme.
pub struct StatPalette;

impl StatPalette {
    /// Health bar and heart icon.
    pub const HEALTH: Rgb8 = Rgb8::new(0xF7, 0x4E, 0x52);
    /// Experience bar and star icon.
    pub const EXPERIENCE: Rgb8 = Rgb8::new(0xFF, 0xB4, 0x45);
    /// Mana bar and gem icon.
    pub const MANA: Rgb8 = Rgb8::new(0x50, 0xB5, 0xE9);
    /// Unfilled bar track.
    pub const TRACK: Rgb8 = Rgb8::new(0x4D, 0x3B, 0x67);
    /// Error panel heading.
    pub const ERROR: Rgb8 = Rgb8::new(0xF7, 0x4E, 0x52);
    /// Avatar disc.
    pub const AVATAR: Rgb8 = Rgb8::new(0x8B, 0x5C, 0xF6);
    /// Avatar glyph.
    pub const AVATAR_GLYPH: Rgb8 = Rgb8::new(0xFF, 0xFF, 0xFF);

    /// Bar color for a stat.
    pub fn color_for(kind: StatKind) -> Rgb8 {
        match kind {
            StatKind::Health => Self::HEALTH,
            StatKind::Experience => Self::EXPERIENCE,
            StatKind::Mana => Self::MANA,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/palette.rs"]
mod tests;
