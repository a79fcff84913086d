// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The `control` section, which sets boot environment variables.
//!
//! Example section:
//!
//! ```text
//! "control": [
//!     { "VTOY_DEFAULT_MENU_MODE": "1" },
//!     { "VTOY_FILT_DOT_UNDERSCORE_FILE": "1" }
//! ]
//! ```
//!
//! Every element sets exactly one variable. Only the first member of an element is looked at, so
//! `{ "A": "1", "B": "2" }` sets `A` and nothing else.

use log::{debug, info, warn};

use crate::{
    document::{Node, NodeKind},
    plugin::{PluginContext, PluginSection, SectionError, SectionHandler},
};

/// The handler for the `control` section.
pub struct ControlSection;

impl SectionHandler for ControlSection {
    fn apply(node: &Node, _base: &str, ctx: &mut PluginContext<'_>) -> Result<(), SectionError> {
        if node.kind() != NodeKind::Array {
            return Err(SectionError::NotArray(
                PluginSection::Control.as_str(),
                node.kind(),
            ));
        }

        for element in node.children() {
            if element.kind() != NodeKind::Object {
                debug!("[CONTROL]: Skipping {} element", element.kind());
                continue;
            }

            let Some(first) = element.children().first() else {
                debug!("[CONTROL]: Skipping empty object");
                continue;
            };

            match (first.name(), first.as_str()) {
                (Some(name), Some(value)) if !name.is_empty() => {
                    match ctx.env.set(name, value) {
                        Ok(()) => info!("{name}={value}"),
                        Err(e) => warn!("[CONTROL]: Failed to set {name}: {e}"),
                    }
                }
                _ => debug!("[CONTROL]: Skipping element without a named string"),
            }
        }

        Ok(())
    }
}
