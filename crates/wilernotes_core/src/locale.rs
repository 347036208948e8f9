//! User-facing label tables.
//!
//! Store defaults (new-note title, folder, welcome note) and view wording
//! (relative dates, empty preview) come from one table per locale so a shell
//! never mixes languages.

use chrono::Datelike;

/// Supported label sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FR_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

const EN_WELCOME: &str = "# Welcome to WilerNotes 📝\n\nThis is your **enriched** notes space.\n\n- Markdown support\n- Automatic saving\n- Wiler design\n\nTry switching the theme!";
const FR_WELCOME: &str = "# Bienvenue sur WilerNotes 📝\n\nCeci est votre espace de notes **enrichi**.\n\n- Support Markdown\n- Sauvegarde automatique\n- Design Wiler\n\nEssayez de changer le thème !";

impl Locale {
    /// Parses `en|fr` case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Self::En),
            "fr" | "fr-fr" => Some(Self::Fr),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    pub fn new_note_title(self) -> &'static str {
        match self {
            Self::En => "New note",
            Self::Fr => "Nouvelle note",
        }
    }

    pub fn default_folder(self) -> &'static str {
        match self {
            Self::En => "Personal",
            Self::Fr => "Personnel",
        }
    }

    pub fn welcome_title(self) -> &'static str {
        "Notes"
    }

    pub fn welcome_content(self) -> &'static str {
        match self {
            Self::En => EN_WELCOME,
            Self::Fr => FR_WELCOME,
        }
    }

    /// Placeholder shown when a preview snippet is empty.
    pub fn empty_preview(self) -> &'static str {
        match self {
            Self::En => "No content",
            Self::Fr => "Aucun contenu",
        }
    }

    pub fn just_now(self) -> &'static str {
        match self {
            Self::En => "just now",
            Self::Fr => "À l'instant",
        }
    }

    pub fn hours_ago(self, hours: i64) -> String {
        match self {
            Self::En if hours == 1 => "1 hour ago".to_string(),
            Self::En => format!("{hours} hours ago"),
            Self::Fr => format!("Il y a {hours}h"),
        }
    }

    pub fn days_ago(self, days: i64) -> String {
        match self {
            Self::En if days == 1 => "1 day ago".to_string(),
            Self::En => format!("{days} days ago"),
            Self::Fr => format!("Il y a {days}j"),
        }
    }

    /// Absolute day + short month, e.g. `Oct 19` or `19 oct.`.
    pub fn short_date(self, date: impl Datelike) -> String {
        match self {
            Self::En => format!("{} {}", EN_MONTHS[date.month0() as usize], date.day()),
            Self::Fr => format!("{} {}", date.day(), FR_MONTHS[date.month0() as usize]),
        }
    }
}
