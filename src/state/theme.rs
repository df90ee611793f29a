//! Color theme selection

use serde::Serialize;

/// Palette names in display order
pub const THEME_NAMES: [&str; 3] = ["rose", "ocean", "mint"];

/// A selected palette, always a valid index into [`THEME_NAMES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub index: usize,
    pub name: &'static str,
}

impl Theme {
    pub fn from_index(index: usize) -> Result<Self, String> {
        THEME_NAMES
            .get(index)
            .map(|name| Self { index, name: *name })
            .ok_or_else(|| format!("Theme index {} out of range (0..{})", index, THEME_NAMES.len()))
    }

    pub fn all() -> impl Iterator<Item = Theme> {
        THEME_NAMES.iter().enumerate().map(|(index, name)| Theme { index, name: *name })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self { index: 0, name: THEME_NAMES[0] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_checked() {
        assert_eq!(Theme::from_index(1).unwrap().name, "ocean");
        assert!(Theme::from_index(3).is_err());
        assert_eq!(Theme::all().count(), 3);
    }
}
