//! Style configuration handed through to whatever renders the form.
//!
//! Nothing in this crate reads these values; they travel with the controller
//! so a presentation layer can pick them up.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccentColor {
    Blue,
    Gray,
    Purple,
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    #[default]
    Filled,
    Bordered,
    Plain,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupportConfiguration {
    pub title: String,
    pub accent_color: AccentColor,
    pub button_style: ButtonStyle,
    pub show_close_button: bool,
}

impl SupportConfiguration {
    pub fn minimal() -> Self {
        Self {
            title: "Help".into(),
            accent_color: AccentColor::Gray,
            button_style: ButtonStyle::Plain,
            show_close_button: false,
        }
    }

    pub fn brand() -> Self {
        Self {
            title: "Contact Us".into(),
            accent_color: AccentColor::Purple,
            button_style: ButtonStyle::Filled,
            show_close_button: true,
        }
    }
}

impl Default for SupportConfiguration {
    fn default() -> Self {
        Self {
            title: "Support".into(),
            accent_color: AccentColor::Blue,
            button_style: ButtonStyle::Filled,
            show_close_button: true,
        }
    }
}
