use super::*;

#[test]
fn known_names_resolve_case_insensitively() {
    assert_eq!(ThemeName::parse_lossy("dark"), ThemeName::Dark);
    assert_eq!(ThemeName::parse_lossy(" LIGHT "), ThemeName::Light);
    assert_eq!(ThemeName::parse_lossy("default"), ThemeName::Default);
}

#[test]
fn unknown_names_fall_back_to_default_triple() {
    for name in ["", "solarized", "dark-ish", "🌙"] {
        let theme = Theme::resolve(name);
        assert_eq!(theme, Theme::DEFAULT, "theme {name:?}");
        assert_eq!(theme.background.to_string(), "#2D1B47");
        assert_eq!(theme.primary_text.to_string(), "#FFFFFF");
        assert_eq!(theme.secondary_text.to_string(), "#D3D3D3");
    }
}

#[test]
fn names_round_trip_through_as_str() {
    for name in [ThemeName::Default, ThemeName::Dark, ThemeName::Light] {
        assert_eq!(ThemeName::parse_lossy(name.as_str()), name);
        assert_eq!(Theme::named(name).name, name);
    }
}

#[test]
fn stat_colors_do_not_depend_on_theme() {
    assert_eq!(StatPalette::color_for(StatKind::Health).to_string(), "#F74E52");
    assert_eq!(
        StatPalette::color_for(StatKind::Experience).to_string(),
        "#FFB445"
    );
    assert_eq!(StatPalette::color_for(StatKind::Mana).to_string(), "#50B5E9");
    assert_ne!(Theme::LIGHT.background, Theme::DARK.background);
}
