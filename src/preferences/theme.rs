use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color32 {
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const WHITE: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub main_background: Color32,
    pub main_color: Color32,
    pub secondary_color: Color32,
    pub main_label: Color32,
    pub secondary_label: Color32,
    pub black_label: Color32,
}

// Shared by both palettes
const MAIN_COLOR: Color32 = Color32::from_rgb(0xfd, 0xf9, 0xe6);
const SECONDARY_COLOR: Color32 = Color32::from_rgb(0xff, 0xcc, 0x5c);
const MAIN_LABEL: Color32 = Color32::from_rgb(0xff, 0x6f, 0x69);

const LIGHT: Palette = Palette {
    main_background: Color32::WHITE,
    main_color: MAIN_COLOR,
    secondary_color: SECONDARY_COLOR,
    main_label: MAIN_LABEL,
    secondary_label: Color32::BLACK,
    black_label: Color32::BLACK,
};

const DARK: Palette = Palette {
    main_background: Color32::BLACK,
    main_color: MAIN_COLOR,
    secondary_color: SECONDARY_COLOR,
    main_label: MAIN_LABEL,
    secondary_label: Color32::WHITE,
    black_label: Color32::BLACK,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_only_in_background_and_secondary_label() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();

        assert_eq!(light.main_color, dark.main_color);
        assert_eq!(light.main_color.to_hex(), "#FDF9E6");
        assert_eq!(light.secondary_color.to_hex(), "#FFCC5C");
        assert_eq!(light.main_label.to_hex(), "#FF6F69");

        assert_eq!(light.main_background, Color32::WHITE);
        assert_eq!(dark.main_background, Color32::BLACK);
        assert_eq!(dark.secondary_label, Color32::WHITE);
    }

    #[test]
    fn test_names_round_trip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::from_name(theme.name()), Some(theme));
            assert_eq!(theme.toggled().toggled(), theme);
        }
        assert_eq!(Theme::from_name(" DARK "), Some(Theme::Dark));
        assert_eq!(Theme::from_name("sepia"), None);
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
