//! Terminal theme for the text report
//!
//! Dark (AMOLED-black) and light palettes, plus a plain mode with no
//! escape codes for files and pipes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Theme mode for report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark theme - default
    #[default]
    Dark,
    /// Light theme (white/cream background friendly)
    Light,
    /// No ANSI escapes
    Plain,
}

impl ThemeMode {
    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => Palette::DARK,
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Plain => Palette::PLAIN,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" | "Dark" | "DARK" => Ok(ThemeMode::Dark),
            "light" | "Light" | "LIGHT" => Ok(ThemeMode::Light),
            "plain" | "Plain" | "PLAIN" | "none" => Ok(ThemeMode::Plain),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Plain => write!(f, "plain"),
        }
    }
}

/// ANSI codes for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg_bright: &'static str,
    pub fg_cyan: &'static str,
    pub fg_yellow: &'static str,
    pub fg_purple: &'static str,
    pub bold: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const DARK: Palette = Palette {
        fg_bright: "\x1b[97m", // Bright white
        fg_cyan: "\x1b[96m",
        fg_yellow: "\x1b[93m",
        fg_purple: "\x1b[95m",
        bold: "\x1b[1m",
        reset: "\x1b[0m",
    };

    pub const LIGHT: Palette = Palette {
        fg_bright: "\x1b[30m", // Black
        fg_cyan: "\x1b[36m",
        fg_yellow: "\x1b[33m",
        fg_purple: "\x1b[35m",
        bold: "\x1b[1m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Palette = Palette {
        fg_bright: "",
        fg_cyan: "",
        fg_yellow: "",
        fg_purple: "",
        bold: "",
        reset: "",
    };
}

const BOX_TL: &str = "╔";
const BOX_TR: &str = "╗";
const BOX_BL: &str = "╚";
const BOX_BR: &str = "╝";
const BOX_H: &str = "═";
const BOX_V: &str = "║";
const BOX_T_RIGHT: &str = "╠";
const BOX_T_LEFT: &str = "╣";

/// Banner style presets
#[derive(Debug, Clone, Copy)]
pub enum BannerStyle {
    /// Section heading (purple)
    Primary,
    /// Neutral panel (cyan)
    Info,
    /// Planning/what-if panel (yellow)
    Warning,
}

impl BannerStyle {
    fn color(self, palette: &Palette) -> &'static str {
        match self {
            BannerStyle::Primary => palette.fg_purple,
            BannerStyle::Info => palette.fg_cyan,
            BannerStyle::Warning => palette.fg_yellow,
        }
    }
}

/// Format a themed banner (80-char wide box)
pub fn format_banner(
    palette: &Palette,
    title: &str,
    content_lines: &[String],
    style: BannerStyle,
) -> String {
    let mut out = String::new();
    let width = 78; // Inner width (80 - 2 for borders)
    let color = style.color(palette);
    let reset = palette.reset;

    out.push_str(&format!("{}{}{}{}{}\n", color, BOX_TL, BOX_H.repeat(width), BOX_TR, reset));

    let title_padded = format!("  {}  ", title);
    let padding = width.saturating_sub(title_padded.chars().count());
    out.push_str(&format!(
        "{}{}{}{}{}{}{}{}{}{}\n",
        color,
        BOX_V,
        reset,
        palette.fg_bright,
        palette.bold,
        title_padded,
        " ".repeat(padding),
        color,
        BOX_V,
        reset
    ));

    if !content_lines.is_empty() {
        out.push_str(&format!(
            "{}{}{}{}{}\n",
            color,
            BOX_T_RIGHT,
            BOX_H.repeat(width),
            BOX_T_LEFT,
            reset
        ));
        for line in content_lines {
            let padding = width.saturating_sub(line.chars().count() + 2);
            out.push_str(&format!(
                "{}{}{}  {}{}{}{}{}\n",
                color,
                BOX_V,
                reset,
                line,
                " ".repeat(padding),
                color,
                BOX_V,
                reset
            ));
        }
    }

    out.push_str(&format!("{}{}{}{}{}\n", color, BOX_BL, BOX_H.repeat(width), BOX_BR, reset));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_banner_has_no_escapes() {
        let banner = format_banner(
            &ThemeMode::Plain.palette(),
            "Overview",
            &["Total Revenue  $1,000.00".to_string()],
            BannerStyle::Primary,
        );
        assert!(!banner.contains('\x1b'));
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.chars().count() == 80));
    }

    #[test]
    fn test_dark_banner_is_colored() {
        let banner = format_banner(&ThemeMode::Dark.palette(), "Overview", &[], BannerStyle::Info);
        assert!(banner.contains("\x1b[96m"));
        assert_eq!(banner.lines().count(), 3);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("PLAIN".parse::<ThemeMode>().unwrap(), ThemeMode::Plain);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}
