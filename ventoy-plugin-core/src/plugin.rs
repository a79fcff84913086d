// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Loads the plugin configuration and dispatches its sections.
//!
//! The plugin configuration lives at `ventoy/ventoy.json` under the base path of the data volume. It is a single
//! object whose members are sections, each of which is handed to a [`SectionHandler`].
//!
//! Example configuration:
//!
//! ```text
//! {
//!     "control": [
//!         { "VTOY_DEFAULT_MENU_MODE": "1" },
//!         { "VTOY_MENU_TIMEOUT": "10" }
//!     ],
//!     "theme": {
//!         "file": "/ventoy/theme/blur/theme.txt",
//!         "gfxmode": "1920x1080"
//!     },
//!     "auto_install": [
//!         { "image": "/iso/debian-12.iso", "template": "/ventoy/script/preseed.cfg" }
//!     ]
//! }
//! ```
//!
//! The configuration is partially trusted. Sections that are not recognized are ignored, so newer configuration
//! files keep working. Sections and elements that have the wrong shape are skipped and logged, and everything
//! around them is still applied. Only a document that cannot be parsed at all fails the load.

use alloc::format;
use log::{debug, warn};
use thiserror::Error;

use crate::{
    PluginResult,
    document::{Document, Node, NodeKind},
    features,
    registry::TemplateRegistry,
    system::{
        env::EnvStore,
        fs::{FsError, PluginVolume},
    },
};

/// The `auto_install` section handler.
pub mod auto_install;

/// The `control` section handler.
pub mod control;

/// The `theme` section handler.
pub mod theme;

/// The directory holding the plugin configuration and its resources, relative to the base path.
pub const VENTOY_DIR: &str = "/ventoy";

/// The configuration path, relative to the base path.
pub const PLUGIN_CONFIG_PATH: &str = "/ventoy/ventoy.json";

/// Errors indicating that a section has the wrong shape.
#[derive(Error, Debug)]
pub enum SectionError {
    /// The section was expected to be an array.
    #[error("Section \"{0}\" is a {1}, not an array")]
    NotArray(&'static str, NodeKind),
}

/// Everything a [`SectionHandler`] may modify.
pub struct PluginContext<'a> {
    /// The volume the configuration was loaded from, for checking resources it refers to.
    pub volume: &'a mut dyn PluginVolume,

    /// The environment that variables are written into.
    pub env: &'a mut dyn EnvStore,

    /// The registry that install templates are written into.
    pub registry: &'a mut TemplateRegistry,
}

impl<'a> PluginContext<'a> {
    /// Constructs a new [`PluginContext`].
    pub fn new(
        volume: &'a mut dyn PluginVolume,
        env: &'a mut dyn EnvStore,
        registry: &'a mut TemplateRegistry,
    ) -> Self {
        Self {
            volume,
            env,
            registry,
        }
    }
}

/// Applies a section of the plugin configuration.
pub trait SectionHandler {
    /// Interprets the section's node, given the base path of the data volume.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the section as a whole has the wrong shape, in which case it should have had no
    /// effect. Problems with single elements are logged and skipped instead.
    fn apply(node: &Node, base: &str, ctx: &mut PluginContext<'_>) -> Result<(), SectionError>;
}

/// The sections that exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluginSection {
    /// Sets boot environment variables.
    Control,

    /// Selects the menu theme and graphics mode.
    Theme,

    /// Registers unattended install templates.
    AutoInstall,
}

impl PluginSection {
    /// Every section, in the order they are looked up.
    pub const ALL: [Self; 3] = [Self::Control, Self::Theme, Self::AutoInstall];

    /// Convert a [`PluginSection`] type into an [`&str`].
    ///
    /// This is the key of the section in the configuration.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Theme => "theme",
            Self::AutoInstall => "auto_install",
        }
    }

    /// Finds the section with the given key. Keys are case sensitive.
    #[must_use = "Has no effect if the result is unused"]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|x| x.as_str() == key)
    }

    /// Applies a node with the handler of this section.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the node does not have the shape the section requires.
    pub fn apply(
        self,
        node: &Node,
        base: &str,
        ctx: &mut PluginContext<'_>,
    ) -> Result<(), SectionError> {
        match self {
            Self::Control => features::control::ControlSection::apply(node, base, ctx),
            Self::Theme => features::theme::ThemeSection::apply(node, base, ctx),
            Self::AutoInstall => features::auto_install::AutoInstallSection::apply(node, base, ctx),
        }
    }
}

/// Dispatches every named node to the handler of its section, in order.
///
/// Unrecognized names and unnamed nodes are ignored. A section that fails is logged, and the next one is
/// dispatched regardless.
pub fn parse_plugin_config(nodes: &[Node], base: &str, ctx: &mut PluginContext<'_>) {
    for node in nodes {
        let Some(name) = node.name() else {
            continue;
        };

        let Some(section) = PluginSection::from_key(name) else {
            debug!("Ignoring unrecognized section \"{name}\"");
            continue;
        };

        debug!("Plugin entry for {}", section.as_str());
        if let Err(e) = section.apply(node, base, ctx) {
            warn!("{e}");
        }
    }
}

/// Loads the plugin configuration of a data volume and applies it.
///
/// The configuration is read from `<base>/ventoy/ventoy.json`. If it cannot be opened, there is no configuration,
/// and nothing is applied. Otherwise, every section of it is dispatched with [`parse_plugin_config`].
///
/// This may be called again when another volume is selected. Each `auto_install` section replaces the whole
/// registry, and variables are overwritten.
///
/// # Errors
///
/// May return an `Error` if the configuration exists but could not be read, there was not enough memory to hold
/// it, or it is malformed. In all of those cases, nothing was applied.
pub fn load_plugin<V: PluginVolume, E: EnvStore>(
    volume: &mut V,
    env: &mut E,
    registry: &mut TemplateRegistry,
    base: &str,
) -> PluginResult<()> {
    let path = format!("{base}{PLUGIN_CONFIG_PATH}");

    let content = match volume.read(&path) {
        Ok(content) => content,
        Err(FsError::OpenErr(status)) => {
            debug!("No plugin configuration at {path} ({status:?})");
            return Ok(());
        }
        Err(FsError::InvalidPath(path)) => {
            debug!("No plugin configuration at unrepresentable path {path}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    debug!("json configuration file size {}", content.len());

    let document = Document::parse(&content).inspect_err(|e| warn!("{path}: {e}"))?;
    drop(content);

    let mut ctx = PluginContext::new(volume, env, registry);
    parse_plugin_config(document.root().children(), base, &mut ctx);

    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        error::PluginError,
        system::memory::{MemoryEnvStore, MemoryVolume},
    };

    /// Loads a configuration from the root of a fresh volume.
    fn load(
        content: &str,
        env: &mut MemoryEnvStore,
        registry: &mut TemplateRegistry,
    ) -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        volume.insert(PLUGIN_CONFIG_PATH, content.as_bytes());
        load_plugin(&mut volume, env, registry, "")
    }

    #[test]
    fn test_section_keys() {
        assert_eq!(PluginSection::from_key("control"), Some(PluginSection::Control));
        assert_eq!(PluginSection::from_key("theme"), Some(PluginSection::Theme));
        assert_eq!(
            PluginSection::from_key("auto_install"),
            Some(PluginSection::AutoInstall)
        );
        assert_eq!(PluginSection::from_key("Control"), None);
        assert_eq!(PluginSection::from_key("menu_alias"), None);
    }

    #[test]
    fn test_control_scenario() -> PluginResult<()> {
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        load(r#"{"control":[{"vtoy_test":"1"}]}"#, &mut env, &mut registry)?;
        assert_eq!(env.get("vtoy_test"), Some("1"));
        assert_eq!(env.len(), 1);
        Ok(())
    }

    #[test]
    fn test_theme_scenario() -> PluginResult<()> {
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        load(r#"{"theme":{"gfxmode":"1024x768"}}"#, &mut env, &mut registry)?;
        assert_eq!(env.get(theme::GFXMODE_VAR), Some("1024x768"));
        assert_eq!(env.get(theme::THEME_VAR), None);
        Ok(())
    }

    #[test]
    fn test_auto_install_scenario() -> PluginResult<()> {
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        load(
            r#"{"auto_install":[{"image":"/a.iso","template":"/a.cfg"},{"image":"/b.iso","template":"/b.cfg"}]}"#,
            &mut env,
            &mut registry,
        )?;
        assert_eq!(registry.get_install_template("/a.iso"), Some("/a.cfg"));
        assert_eq!(registry.get_install_template("/b.iso"), Some("/b.cfg"));
        assert_eq!(registry.get_install_template("/c.iso"), None);

        // reloading with an empty section clears every template
        load(r#"{"auto_install":[]}"#, &mut env, &mut registry)?;
        assert_eq!(registry.get_install_template("/a.iso"), None);
        assert_eq!(registry.get_install_template("/b.iso"), None);
        assert!(registry.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_leaves_state() -> PluginResult<()> {
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        load(
            r#"{"control":[{"vtoy_test":"1"}],"auto_install":[{"image":"/a.iso","template":"/a.cfg"}]}"#,
            &mut env,
            &mut registry,
        )?;
        let env_before = env.clone();
        let registry_before = registry.clone();

        let result = load(
            r#"{"control":[{"vtoy_test":"2"}],"auto_install":[]"#,
            &mut env,
            &mut registry,
        );
        assert!(matches!(result, Err(PluginError::DocumentError(_))));
        assert_eq!(env, env_before);
        assert_eq!(registry, registry_before);
        Ok(())
    }

    #[test]
    fn test_missing_config() -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        registry.register(crate::registry::InstallTemplate::new("/a.iso", "/a.cfg"));

        load_plugin(&mut volume, &mut env, &mut registry, "")?;
        assert!(env.is_empty());
        assert_eq!(registry.len(), 1); // untouched when there is no configuration
        Ok(())
    }

    #[test]
    fn test_base_path() -> PluginResult<()> {
        let mut volume = MemoryVolume::new();
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        volume.insert(
            "/mnt/data/ventoy/ventoy.json",
            br#"{"control":[{"VTOY_MENU_TIMEOUT":"5"}]}"#.as_slice(),
        );

        load_plugin(&mut volume, &mut env, &mut registry, "")?;
        assert!(env.is_empty());

        load_plugin(&mut volume, &mut env, &mut registry, "/mnt/data")?;
        assert_eq!(env.get("VTOY_MENU_TIMEOUT"), Some("5"));
        Ok(())
    }

    #[test]
    fn test_unknown_and_bad_sections() -> PluginResult<()> {
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        load(
            r#"{
                "menu_alias": [{"image": "/a.iso", "alias": "A"}],
                "control": {"vtoy_bad": "1"},
                "auto_install": "/a.iso",
                "theme": {"gfxmode": "800x600"}
            }"#,
            &mut env,
            &mut registry,
        )?;
        assert_eq!(env.get("vtoy_bad"), None);
        assert_eq!(env.get(theme::GFXMODE_VAR), Some("800x600"));
        assert!(registry.is_empty());
        Ok(())
    }

    #[test]
    fn test_sections_in_document_order() -> PluginResult<()> {
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        load(
            r#"{
                "control": [{"vtoy_gfxmode": "640x480"}],
                "theme": {"gfxmode": "1024x768"},
                "auto_install": [{"image": "/a.iso", "template": "/old.cfg"}],
                "auto_install": [{"image": "/a.iso", "template": "/new.cfg"}]
            }"#,
            &mut env,
            &mut registry,
        )?;
        assert_eq!(env.get("vtoy_gfxmode"), Some("1024x768"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_install_template("/a.iso"), Some("/new.cfg"));
        Ok(())
    }

    #[test]
    fn test_non_object_root() -> PluginResult<()> {
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        load(r#"[{"control":[{"vtoy_test":"1"}]}]"#, &mut env, &mut registry)?;
        load(r#""control""#, &mut env, &mut registry)?;
        assert!(env.is_empty());
        Ok(())
    }

    #[test]
    fn test_reload_is_idempotent() -> PluginResult<()> {
        let content = r#"{"auto_install":[
            {"image":"/a.iso","template":"/a.cfg"},
            {"image":"a.iso","template":"/skipped.cfg"},
            {"image":"/b.iso","template":"/b.cfg"}
        ]}"#;
        let mut env = MemoryEnvStore::new();
        let mut registry = TemplateRegistry::new();
        load(content, &mut env, &mut registry)?;
        let once = registry.clone();
        load(content, &mut env, &mut registry)?;
        assert_eq!(registry, once);
        assert_eq!(registry.len(), 2);
        Ok(())
    }

    proptest! {
        #[test]
        fn doesnt_panic(x in any::<Vec<u8>>()) {
            let mut volume = MemoryVolume::new();
            let mut env = MemoryEnvStore::new();
            let mut registry = TemplateRegistry::new();
            volume.insert(PLUGIN_CONFIG_PATH, x);
            let _ = load_plugin(&mut volume, &mut env, &mut registry, "");
        }

        #[test]
        fn control_sets_each_key(pairs in proptest::collection::vec(("[A-Za-z_]{1,12}", "[a-z0-9]{0,8}"), 0..8)) {
            let elements: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("{{\"{k}\": \"{v}\"}}"))
                .collect();
            let content = format!("{{\"control\": [{}]}}", elements.join(","));

            let mut env = MemoryEnvStore::new();
            let mut registry = TemplateRegistry::new();
            prop_assert!(load(&content, &mut env, &mut registry).is_ok());
            for (k, _) in &pairs {
                // the last element with the same key wins
                let expected = pairs.iter().rev().find(|(x, _)| x == k).map(|(_, v)| v.as_str());
                prop_assert_eq!(env.get(k), expected);
            }
        }
    }
}
