//! Theme table and appearance settings for presentation shells.
//!
//! # Invariants
//! - Appearance never reads or writes note state.
//! - Palette tokens are opaque to core; shells map them to their styling.

/// Selectable background themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Monterey,
    Ventura,
    Sonoma,
    Sequoia,
}

/// Style tokens for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub glass: &'static str,
    pub dark_glass: &'static str,
    pub text: &'static str,
    pub dark_text: &'static str,
    pub accent: &'static str,
    pub border: &'static str,
    pub dark_border: &'static str,
}

const DARK_TEXT: &str = "text-white";
const LIGHT_TEXT: &str = "text-gray-900";
const DARK_BORDER: &str = "border-white/20";

impl Theme {
    pub const ALL: [Theme; 4] = [Self::Monterey, Self::Ventura, Self::Sonoma, Self::Sequoia];

    /// Parses a theme key or display name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.key().eq_ignore_ascii_case(wanted))
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Monterey => "monterey",
            Self::Ventura => "ventura",
            Self::Sonoma => "sonoma",
            Self::Sequoia => "sequoia",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Monterey => "Monterey",
            Self::Ventura => "Ventura",
            Self::Sonoma => "Sonoma",
            Self::Sequoia => "Sequoia",
        }
    }

    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Monterey => ThemePalette {
                background: "bg-gradient-to-br from-blue-400 via-purple-400 to-pink-400",
                glass: "bg-white/70 backdrop-blur-2xl",
                dark_glass: "bg-gray-900/80 backdrop-blur-2xl",
                text: LIGHT_TEXT,
                dark_text: DARK_TEXT,
                accent: "from-blue-500 to-purple-500",
                border: "border-white/50",
                dark_border: DARK_BORDER,
            },
            Self::Ventura => ThemePalette {
                background: "bg-gradient-to-br from-orange-300 via-rose-300 to-purple-400",
                glass: "bg-white/75 backdrop-blur-2xl",
                dark_glass: "bg-gray-900/85 backdrop-blur-2xl",
                text: LIGHT_TEXT,
                dark_text: DARK_TEXT,
                accent: "from-orange-500 to-rose-500",
                border: "border-white/60",
                dark_border: DARK_BORDER,
            },
            Self::Sonoma => ThemePalette {
                background: "bg-gradient-to-br from-emerald-400 via-teal-400 to-cyan-500",
                glass: "bg-white/70 backdrop-blur-2xl",
                dark_glass: "bg-gray-900/80 backdrop-blur-2xl",
                text: LIGHT_TEXT,
                dark_text: DARK_TEXT,
                accent: "from-emerald-500 to-teal-500",
                border: "border-white/50",
                dark_border: DARK_BORDER,
            },
            Self::Sequoia => ThemePalette {
                background: "bg-gradient-to-br from-indigo-400 via-blue-400 to-cyan-400",
                glass: "bg-white/75 backdrop-blur-2xl",
                dark_glass: "bg-gray-900/85 backdrop-blur-2xl",
                text: LIGHT_TEXT,
                dark_text: DARK_TEXT,
                accent: "from-indigo-500 to-blue-500",
                border: "border-white/60",
                dark_border: DARK_BORDER,
            },
        }
    }
}

/// Current theme plus dark-mode flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Appearance {
    pub theme: Theme,
    pub dark: bool,
}

impl Appearance {
    pub fn toggle_dark(&mut self) -> bool {
        self.dark = !self.dark;
        self.dark
    }

    /// Panel surface token for the current mode.
    pub fn surface(self) -> &'static str {
        let palette = self.theme.palette();
        if self.dark {
            palette.dark_glass
        } else {
            palette.glass
        }
    }

    pub fn text(self) -> &'static str {
        let palette = self.theme.palette();
        if self.dark {
            palette.dark_text
        } else {
            palette.text
        }
    }
}
