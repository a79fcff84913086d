// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The `auto_install` section, which registers unattended install templates.
//!
//! Example section:
//!
//! ```text
//! "auto_install": [
//!     { "image": "/iso/debian-12.iso", "template": "/ventoy/script/debian.cfg" },
//!     { "image": "/iso/rhel-9.iso", "template": "/ventoy/script/rhel.ks" }
//! ]
//! ```
//!
//! The section replaces the whole [`TemplateRegistry`], so an empty array removes every template that a
//! previously loaded configuration registered.

use log::debug;

use crate::{
    document::{Node, NodeKind},
    plugin::{PluginContext, PluginSection, SectionError, SectionHandler},
    registry::{InstallTemplate, TemplateRegistry},
};

/// The handler for the `auto_install` section.
pub struct AutoInstallSection;

impl SectionHandler for AutoInstallSection {
    fn apply(node: &Node, _base: &str, ctx: &mut PluginContext<'_>) -> Result<(), SectionError> {
        if node.kind() != NodeKind::Array {
            return Err(SectionError::NotArray(
                PluginSection::AutoInstall.as_str(),
                node.kind(),
            ));
        }

        let mut registry = TemplateRegistry::new();
        for element in node.children() {
            match get_install_template(element) {
                Some(template) => {
                    debug!(
                        "[AUTO_INSTALL]: {} -> {}",
                        template.image_path(),
                        template.template_path()
                    );
                    registry.register(template);
                }
                None => debug!("[AUTO_INSTALL]: Skipping element without absolute image and template"),
            }
        }

        ctx.registry.replace(registry);
        Ok(())
    }
}

/// Gets an [`InstallTemplate`] from an element, if both of its paths are present and absolute.
fn get_install_template(element: &Node) -> Option<InstallTemplate> {
    let image = element.get_str("image").filter(|x| x.starts_with('/'))?;
    let template = element.get_str("template").filter(|x| x.starts_with('/'))?;
    Some(InstallTemplate::new(image, template))
}
