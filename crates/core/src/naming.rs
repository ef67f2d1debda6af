//! Recover family, weight, italic and suffix from `Family[_suffix]-WeightItalic` file names.

use std::fmt;

/// Named weight classes in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeightName {
    Thin,
    ExtraLight,
    Light,
    Regular,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl WeightName {
    pub const ALL: [WeightName; 9] = [
        WeightName::Thin,
        WeightName::ExtraLight,
        WeightName::Light,
        WeightName::Regular,
        WeightName::Medium,
        WeightName::SemiBold,
        WeightName::Bold,
        WeightName::ExtraBold,
        WeightName::Black,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            WeightName::Thin => "Thin",
            WeightName::ExtraLight => "ExtraLight",
            WeightName::Light => "Light",
            WeightName::Regular => "Regular",
            WeightName::Medium => "Medium",
            WeightName::SemiBold => "SemiBold",
            WeightName::Bold => "Bold",
            WeightName::ExtraBold => "ExtraBold",
            WeightName::Black => "Black",
        }
    }

    /// Canonical OS/2 weight class of the name.
    pub const fn value(self) -> u32 {
        match self {
            WeightName::Thin => 100,
            WeightName::ExtraLight => 200,
            WeightName::Light => 300,
            WeightName::Regular => 400,
            WeightName::Medium => 500,
            WeightName::SemiBold => 600,
            WeightName::Bold => 700,
            WeightName::ExtraBold => 800,
            WeightName::Black => 900,
        }
    }

    /// Bucket a numeric weight: each name covers the values up to and
    /// including its canonical value; anything above 800 is Black.
    pub fn classify(value: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|name| value <= name.value())
            .unwrap_or(WeightName::Black)
    }

    /// Look up a style token, case-insensitively, including common aliases.
    pub fn from_token(token: &str) -> Option<Self> {
        let name = match token.to_ascii_lowercase().as_str() {
            "thin" => WeightName::Thin,
            "extralight" | "ultralight" => WeightName::ExtraLight,
            "light" => WeightName::Light,
            "regular" | "book" | "normal" => WeightName::Regular,
            "medium" => WeightName::Medium,
            "semibold" | "demibold" => WeightName::SemiBold,
            "bold" => WeightName::Bold,
            "extrabold" | "ultrabold" | "heavy" => WeightName::ExtraBold,
            "black" | "extrablack" | "ultrablack" => WeightName::Black,
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for WeightName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A textual weight paired with its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Weight {
    pub name: WeightName,
    pub value: u32,
}

impl Weight {
    pub const REGULAR: Self = Self::named(WeightName::Regular);

    pub const fn named(name: WeightName) -> Self {
        Self { name, value: name.value() }
    }

    pub fn numeric(value: u32) -> Self {
        Self { name: WeightName::classify(value), value }
    }

    /// Parse a weight token (no italic marker). Digits are taken as a numeric
    /// weight, names go through the alias table, anything else is Regular.
    pub fn parse(token: &str) -> Self {
        let token = if token.is_empty() { "Regular" } else { token };
        if token.bytes().all(|b| b.is_ascii_digit()) {
            // Only overflow can fail here; such a weight is heavier than anything.
            return Self::numeric(token.parse().unwrap_or(u32::MAX));
        }
        WeightName::from_token(token).map(Self::named).unwrap_or(Self::REGULAR)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::REGULAR
    }
}

/// Metadata recovered from one source file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    pub filename: String,
    pub family: String,
    pub weight: Weight,
    pub italic: bool,
    pub suffix: Option<String>,
}

const ITALIC: &str = "italic";

/// Split an optional trailing `Italic` (any case) off a style token.
fn split_italic(style: &str) -> (&str, bool) {
    let Some(cut) = style.len().checked_sub(ITALIC.len()) else {
        return (style, false);
    };
    if style.is_char_boundary(cut) && style[cut..].eq_ignore_ascii_case(ITALIC) {
        (&style[..cut], true)
    } else {
        (style, false)
    }
}

/// Parse a file name. Never fails: unknown shapes fall back to Regular/400,
/// upright, no suffix.
pub fn parse(filename: &str) -> FontDescriptor {
    let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
    let (before_dash, style) = stem.split_once('-').unwrap_or((stem, "Regular"));
    let (family, suffix) = match before_dash.split_once('_') {
        Some((family, suffix)) => (family, Some(suffix).filter(|s| !s.is_empty())),
        None => (before_dash, None),
    };
    let (weight_token, italic) = split_italic(style);

    FontDescriptor {
        filename: filename.to_string(),
        family: family.to_string(),
        weight: Weight::parse(weight_token),
        italic,
        suffix: suffix.map(str::to_string),
    }
}

/// Parse every file name, preserving order.
pub fn parse_all<I, S>(filenames: I) -> Vec<FontDescriptor>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    filenames.into_iter().map(|name| parse(name.as_ref())).collect()
}
