use std::{env, fmt, sync::Once};

use colored::{ColoredString, Colorize};
use finboard_domain::ComparisonStatus;

/// Decides whether and how terminal text is coloured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        enable_styling();
        Self { color: true }
    }

    /// Colour only when the user preference allows it and `NO_COLOR` is unset.
    pub fn from_preference(ui_color_enabled: bool) -> Self {
        let no_color = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        if ui_color_enabled && !no_color {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    pub fn status(&self, status: ComparisonStatus) -> String {
        let label = status.as_str();
        if !self.color {
            return label.to_string();
        }
        let styled: ColoredString = if status.is_unfavourable() {
            label.red().bold()
        } else {
            label.green()
        };
        styled.to_string()
    }

    pub fn header(&self, text: impl fmt::Display) -> String {
        let base = format!("=== {text} ===");
        if self.color {
            base.bold().to_string()
        } else {
            base
        }
    }

    pub fn warning(&self, text: impl fmt::Display) -> String {
        let base = format!("WARNING: {text}");
        if self.color {
            base.bright_yellow().to_string()
        } else {
            base
        }
    }

    pub fn hint(&self, text: impl fmt::Display) -> String {
        let base = text.to_string();
        if self.color {
            base.bright_cyan().to_string()
        } else {
            base
        }
    }
}

static STYLING: Once = Once::new();

// `colored` drops styling when stdout is not a TTY; a colored palette has already decided.
// Plain palettes never reach `colored`, so the override is set once and never cleared.
fn enable_styling() {
    STYLING.call_once(|| colored::control::set_override(true));
}
