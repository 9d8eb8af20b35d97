//! Style specifications carried by inline wrappers.
//!
//! A [`StyleSpec`] holds a small set of recognized presentation properties
//! plus an `extra` map that is passed through untouched. Specs can be built
//! from a [`Preset`] or parsed from the picker declaration grammar
//! (`font-weight=bold & background-color=yellow`).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Background color applied when no style is requested.
pub const DEFAULT_HIGHLIGHT: &str = "yellow";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleParseError {
    #[error("style declaration list is empty")]
    Empty,
    #[error("declaration `{0}` has no `=`")]
    MissingValue(String),
    #[error("declaration `{0}` has an empty property name")]
    MissingKey(String),
}

/// Presentation properties the wrapper understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    FontWeight,
    FontStyle,
    TextDecoration,
    Color,
    BackgroundColor,
}

impl StyleProperty {
    pub const ALL: [Self; 5] = [
        Self::FontWeight,
        Self::FontStyle,
        Self::TextDecoration,
        Self::Color,
        Self::BackgroundColor,
    ];

    pub const fn css_name(self) -> &'static str {
        match self {
            Self::FontWeight => "font-weight",
            Self::FontStyle => "font-style",
            Self::TextDecoration => "text-decoration",
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
        }
    }

    /// Look up a property by CSS (`background-color`) or script (`backgroundColor`) name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.css_name() == name || kebab_case(name) == p.css_name())
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Property/value pairs applied verbatim to a wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleSpec {
    properties: BTreeMap<StyleProperty, String>,
    /// Unrecognized properties, keys normalized to kebab case
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra: BTreeMap<String, String>,
}

impl StyleSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// A background highlight in `color`.
    pub fn highlight(color: impl Into<String>) -> Self {
        Self::new().with(StyleProperty::BackgroundColor, color)
    }

    #[must_use]
    pub fn with(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.properties.insert(property, value.into());
        self
    }

    /// Set a property by name. Unknown names land in the passthrough map,
    /// converted from camelCase the same way known ones are.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match StyleProperty::from_name(name) {
            Some(property) => {
                self.properties.insert(property, value);
            }
            None => {
                self.extra.insert(kebab_case(name.trim()), value);
            }
        }
    }

    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.properties.get(&property).map(String::as_str)
    }

    pub const fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.extra.is_empty()
    }

    /// Later values win; used to layer a parsed style over a preset.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        self.properties
            .extend(other.properties.iter().map(|(k, v)| (*k, v.clone())));
        self.extra
            .extend(other.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Declarations in a stable order: known properties first, then extras.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.css_name(), v.as_str()))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Render as an inline `style` attribute value.
    pub fn to_css(&self) -> String {
        self.declarations()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse `key=value & key=value` declarations.
    ///
    /// Whitespace around `&` and `=` is ignored and blank declarations are
    /// skipped. Keys may be written in CSS or camelCase form.
    ///
    /// # Errors
    /// Fails on a declaration without `=`, with an empty key, or when no
    /// declaration is present at all.
    pub fn parse(input: &str) -> Result<Self, StyleParseError> {
        let mut spec = Self::new();
        for declaration in input.split('&').map(str::trim) {
            if declaration.is_empty() {
                continue;
            }
            let (key, value) = declaration
                .split_once('=')
                .ok_or_else(|| StyleParseError::MissingValue(declaration.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(StyleParseError::MissingKey(declaration.to_string()));
            }
            spec.set(key, value.trim());
        }
        if spec.is_empty() {
            return Err(StyleParseError::Empty);
        }
        Ok(spec)
    }
}

impl std::str::FromStr for StyleSpec {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The picker palette.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Black,
    Gray,
    Silver,
    White,
    Maroon,
    Red,
    Orange,
    Yellow,
    Lime,
    Aqua,
    Blue,
    Navy,
    Purple,
    Fuchsia,
}

impl Preset {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Black => "black",
            Self::Gray => "gray",
            Self::Silver => "silver",
            Self::White => "white",
            Self::Maroon => "maroon",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Lime => "lime",
            Self::Aqua => "aqua",
            Self::Blue => "blue",
            Self::Navy => "navy",
            Self::Purple => "purple",
            Self::Fuchsia => "fuchsia",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(s, true).ok()
    }

    pub fn style(self) -> StyleSpec {
        match self {
            Self::Bold => StyleSpec::new().with(StyleProperty::FontWeight, "bold"),
            Self::Italic => StyleSpec::new().with(StyleProperty::FontStyle, "italic"),
            Self::Underline => StyleSpec::new().with(StyleProperty::TextDecoration, "underline"),
            Self::Strikethrough => {
                StyleSpec::new().with(StyleProperty::TextDecoration, "line-through")
            }
            color => StyleSpec::highlight(color.name()),
        }
    }
}

/// Element name used for inserted wrappers.
#[derive(
    clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum WrapperTag {
    /// `<formatted-text>`
    #[default]
    Format,
    /// `<mark>`
    Highlight,
}

impl WrapperTag {
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Format => "formatted-text",
            Self::Highlight => "mark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "format" | "formatted-text" => Some(Self::Format),
            "highlight" | "mark" => Some(Self::Highlight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_declaration() {
        let spec = StyleSpec::parse("font-weight=bold").unwrap();
        assert_eq!(spec.get(StyleProperty::FontWeight), Some("bold"));
        assert!(spec.extra().is_empty());
    }

    #[test]
    fn test_parse_ignores_whitespace_around_separators() {
        let spec = StyleSpec::parse(" font-style = italic &  background-color=  red ").unwrap();
        assert_eq!(spec.get(StyleProperty::FontStyle), Some("italic"));
        assert_eq!(spec.get(StyleProperty::BackgroundColor), Some("red"));
    }

    #[test]
    fn test_parse_accepts_camel_case_keys() {
        let spec = StyleSpec::parse("backgroundColor=#ffff00").unwrap();
        assert_eq!(spec.get(StyleProperty::BackgroundColor), Some("#ffff00"));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let spec = StyleSpec::parse("letter-spacing=2px & font-weight=bold").unwrap();
        assert_eq!(spec.extra().get("letter-spacing").map(String::as_str), Some("2px"));
        assert_eq!(spec.to_css(), "font-weight: bold; letter-spacing: 2px;");
    }

    #[test]
    fn test_unknown_camel_case_keys_become_css_names() {
        let spec: StyleSpec = "letterSpacing=2px & fontWeight=bold".parse().unwrap();
        assert_eq!(spec.extra().get("letter-spacing").map(String::as_str), Some("2px"));
        assert!(!spec.extra().contains_key("letterSpacing"));
        assert_eq!(spec.to_css(), "font-weight: bold; letter-spacing: 2px;");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(StyleSpec::parse(""), Err(StyleParseError::Empty));
        assert_eq!(StyleSpec::parse(" & "), Err(StyleParseError::Empty));
        assert_eq!(
            StyleSpec::parse("bold"),
            Err(StyleParseError::MissingValue("bold".to_string()))
        );
        assert_eq!(
            StyleSpec::parse("=red"),
            Err(StyleParseError::MissingKey("=red".to_string()))
        );
    }

    #[test]
    fn test_presets_match_picker_values() {
        assert_eq!(Preset::Bold.style(), StyleSpec::parse("font-weight=bold").unwrap());
        assert_eq!(
            Preset::Strikethrough.style(),
            StyleSpec::parse("text-decoration=line-through").unwrap()
        );
        assert_eq!(Preset::Navy.style(), StyleSpec::highlight("navy"));
        assert_eq!(Preset::parse("Fuchsia"), Some(Preset::Fuchsia));
        assert_eq!(Preset::parse("mauve"), None);
    }

    #[test]
    fn test_merged_prefers_later_values() {
        let merged = Preset::Yellow
            .style()
            .merged(&StyleSpec::parse("background-color=lime & font-weight=bold").unwrap());
        assert_eq!(merged.get(StyleProperty::BackgroundColor), Some("lime"));
        assert_eq!(merged.get(StyleProperty::FontWeight), Some("bold"));
    }

    #[test]
    fn test_css_order_is_stable() {
        let spec = StyleSpec::new()
            .with(StyleProperty::BackgroundColor, "red")
            .with(StyleProperty::FontWeight, "bold");
        assert_eq!(spec.to_css(), "font-weight: bold; background-color: red;");
    }

    #[test]
    fn test_wrapper_tag_names() {
        assert_eq!(WrapperTag::default().tag_name(), "formatted-text");
        assert_eq!(WrapperTag::parse("highlight"), Some(WrapperTag::Highlight));
        assert_eq!(WrapperTag::Highlight.tag_name(), "mark");
    }
}
