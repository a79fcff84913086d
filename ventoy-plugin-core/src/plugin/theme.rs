// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The `theme` section, which selects the boot menu theme and graphics mode.
//!
//! Example section:
//!
//! ```text
//! "theme": {
//!     "file": "theme/blur/theme.txt",
//!     "gfxmode": "1920x1080"
//! }
//! ```
//!
//! A `file` starting with `/` is relative to the base path, anything else is relative to the `ventoy` directory
//! under the base path. The theme is only selected if the file exists.

use alloc::format;
use log::{debug, info, warn};

use crate::{
    document::Node,
    plugin::{PluginContext, SectionError, SectionHandler, VENTOY_DIR},
    types::BoundedPath,
};

/// The variable holding the path of the theme file.
pub const THEME_VAR: &str = "vtoy_theme";

/// The variable holding the graphics mode.
pub const GFXMODE_VAR: &str = "vtoy_gfxmode";

/// The handler for the `theme` section.
pub struct ThemeSection;

impl SectionHandler for ThemeSection {
    fn apply(node: &Node, base: &str, ctx: &mut PluginContext<'_>) -> Result<(), SectionError> {
        if let Some(file) = node.get_str("file") {
            let path = resolve_theme_path(base, file);
            if ctx.volume.is_file(&path) {
                set_var(ctx, THEME_VAR, &path);
            } else {
                debug!("[THEME]: Theme file {} does not exist", path.as_str());
            }
        }

        if let Some(gfxmode) = node.get_str("gfxmode") {
            set_var(ctx, GFXMODE_VAR, gfxmode);
        }

        Ok(())
    }
}

/// Resolves the path of a theme file given the base path.
fn resolve_theme_path(base: &str, file: &str) -> BoundedPath {
    if file.starts_with('/') {
        BoundedPath::new(&format!("{base}{file}"))
    } else {
        BoundedPath::new(&format!("{base}{VENTOY_DIR}/{file}"))
    }
}

/// Sets a variable, logging the outcome.
fn set_var(ctx: &mut PluginContext<'_>, name: &str, value: &str) {
    match ctx.env.set(name, value) {
        Ok(()) => info!("{name} {value}"),
        Err(e) => warn!("[THEME]: Failed to set {name}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        PluginResult,
        document::Document,
        registry::TemplateRegistry,
        system::memory::{MemoryEnvStore, MemoryVolume},
        types::MAX_PATH,
    };

    /// Applies a `theme` section with the given volume and base path.
    fn apply(section: &str, volume: &mut MemoryVolume, base: &str) -> PluginResult<MemoryEnvStore> {
        let doc = Document::parse(section.as_bytes())?;
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        let mut ctx = PluginContext::new(volume, &mut env, &mut registry);
        assert!(ThemeSection::apply(doc.root(), base, &mut ctx).is_ok());
        Ok(env)
    }

    #[test]
    fn test_resolve_theme_path() {
        assert_eq!(
            resolve_theme_path("", "/ventoy/theme/blur/theme.txt").as_str(),
            "/ventoy/theme/blur/theme.txt"
        );
        assert_eq!(
            resolve_theme_path("", "theme/blur/theme.txt").as_str(),
            "/ventoy/theme/blur/theme.txt"
        );
        assert_eq!(
            resolve_theme_path("/mnt", "/themes/theme.txt").as_str(),
            "/mnt/themes/theme.txt"
        );
    }

    #[test]
    fn test_relative_file() -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        volume.insert("/ventoy/theme/theme.txt", b"".as_slice());
        let env = apply(r#"{"file": "theme/theme.txt"}"#, &mut volume, "")?;
        assert_eq!(env.get(THEME_VAR), Some("/ventoy/theme/theme.txt"));
        assert_eq!(env.get(GFXMODE_VAR), None);
        Ok(())
    }

    #[test]
    fn test_absolute_file_with_base() -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        volume.insert("/data/themes/theme.txt", b"".as_slice());
        let env = apply(
            r#"{"file": "/themes/theme.txt", "gfxmode": "1920x1080"}"#,
            &mut volume,
            "/data",
        )?;
        assert_eq!(env.get(THEME_VAR), Some("/data/themes/theme.txt"));
        assert_eq!(env.get(GFXMODE_VAR), Some("1920x1080"));
        Ok(())
    }

    #[test]
    fn test_missing_file() -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        let env = apply(
            r#"{"file": "theme/missing.txt", "gfxmode": "1024x768"}"#,
            &mut volume,
            "",
        )?;
        assert_eq!(env.get(THEME_VAR), None);
        assert_eq!(env.get(GFXMODE_VAR), Some("1024x768"));
        Ok(())
    }

    #[test]
    fn test_no_file() -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        let env = apply(r#"{"gfxmode": "1024x768"}"#, &mut volume, "")?;
        assert_eq!(env.get(THEME_VAR), None);
        assert_eq!(env.get(GFXMODE_VAR), Some("1024x768"));
        Ok(())
    }

    #[test]
    fn test_non_string_values() -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        volume.insert("/ventoy/1", b"".as_slice());
        let env = apply(r#"{"file": 1, "gfxmode": ["1024x768"]}"#, &mut volume, "")?;
        assert!(env.is_empty());

        // an array has no named children, so it is treated as an empty theme
        let env = apply(r#"["file", "gfxmode"]"#, &mut volume, "")?;
        assert!(env.is_empty());
        Ok(())
    }

    #[test]
    fn test_overlong_path_truncated() -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        let file = "t".repeat(300);
        let truncated = format!("/ventoy/{file}")[..MAX_PATH - 1].to_owned();
        volume.insert(truncated.clone(), b"".as_slice());

        let env = apply(&format!(r#"{{"file": "{file}"}}"#), &mut volume, "")?;
        assert_eq!(env.get(THEME_VAR), Some(truncated.as_str()));
        Ok(())
    }
}
