use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::format::FormatOptions;
use crate::style::{DEFAULT_HIGHLIGHT, Preset, StyleSpec, WrapperTag};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub preset: Option<Preset>,
    pub style: Option<String>,
    pub tag: Option<WrapperTag>,
    pub viewer_origin: Option<String>,
    pub report: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            preset: other.preset.or(self.preset),
            style: other.style.clone().or_else(|| self.style.clone()),
            tag: other.tag.or(self.tag),
            viewer_origin: other
                .viewer_origin
                .clone()
                .or_else(|| self.viewer_origin.clone()),
            report: self.report || other.report,
        }
    }

    /// The style to apply: the preset (or a yellow highlight when neither a
    /// preset nor declarations are given) with declarations layered on top.
    pub fn style_spec(&self) -> Result<StyleSpec> {
        let base = match (self.preset, &self.style) {
            (Some(preset), _) => preset.style(),
            (None, Some(_)) => StyleSpec::new(),
            (None, None) => StyleSpec::highlight(DEFAULT_HIGHLIGHT),
        };
        let Some(declarations) = &self.style else {
            return Ok(base);
        };
        let parsed = declarations
            .parse::<StyleSpec>()
            .with_context(|| format!("Invalid style declarations `{declarations}`"))?;
        Ok(base.merged(&parsed))
    }

    pub fn format_options(&self) -> Result<FormatOptions> {
        Ok(FormatOptions::new(
            self.style_spec()?,
            self.tag.unwrap_or_default(),
        ))
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("inkmark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("inkmark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("inkmark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("inkmark").join("config");
        }
    }

    PathBuf::from(".inkmarkrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".inkmarkrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split a config line into flag tokens. The value of `--style` runs to the
/// end of the line, since declarations contain spaces around `&`.
fn line_tokens(line: &str) -> Vec<String> {
    if let Some(value) = line.strip_prefix("--style ") {
        return vec!["--style".to_string(), value.trim().to_string()];
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# inkmark defaults (saved with --save)".to_string());
    if let Some(preset) = flags.preset {
        lines.push(format!("--preset {}", preset.name()));
    }
    if let Some(style) = &flags.style {
        lines.push(format!("--style {style}"));
    }
    if let Some(tag) = flags.tag {
        let tag_str = match tag {
            WrapperTag::Format => "format",
            WrapperTag::Highlight => "highlight",
        };
        lines.push(format!("--tag {tag_str}"));
    }
    if let Some(origin) = &flags.viewer_origin {
        lines.push(format!("--viewer-origin {origin}"));
    }
    if flags.report {
        lines.push("--report".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--report" {
            flags.report = true;
        } else if token == "--preset" {
            if let Some(next) = tokens.get(i + 1) {
                flags.preset = Preset::parse(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--preset=") {
            flags.preset = Preset::parse(value);
        } else if token == "--style" {
            if let Some(next) = tokens.get(i + 1) {
                flags.style = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--style=") {
            flags.style = Some(value.to_string());
        } else if token == "--tag" {
            if let Some(next) = tokens.get(i + 1) {
                flags.tag = WrapperTag::parse(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--tag=") {
            flags.tag = WrapperTag::parse(value);
        } else if token == "--viewer-origin" {
            if let Some(next) = tokens.get(i + 1) {
                flags.viewer_origin = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--viewer-origin=") {
            flags.viewer_origin = Some(value.to_string());
        }
        i += 1;
    }
    flags
}
