// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`TemplateRegistry`], the collection of unattended install templates.
//!
//! An install template pairs the path of a bootable image with the path of an answer file (a preseed, kickstart,
//! autoinstall or unattend file) that should be used when that image is booted. The registry is filled by the
//! `auto_install` section of the plugin configuration, and is queried once an image is selected.
//!
//! Entries are kept in lookup order, with the most recently registered entry first. The same image may be
//! registered more than once, in which case the latest registration shadows the others.

use core::fmt;

use alloc::collections::VecDeque;
use log::info;

use crate::types::BoundedPath;

/// A pairing of a bootable image to its answer file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallTemplate {
    /// The absolute path of the image on the data volume.
    image_path: BoundedPath,

    /// The absolute path of the answer file on the data volume.
    template_path: BoundedPath,
}

impl InstallTemplate {
    /// Constructs a new [`InstallTemplate`].
    ///
    /// Both paths are bounded, see [`BoundedPath::new`].
    #[must_use = "Has no effect if the result is unused"]
    pub fn new(image_path: &str, template_path: &str) -> Self {
        Self {
            image_path: BoundedPath::new(image_path),
            template_path: BoundedPath::new(template_path),
        }
    }

    /// The path of the image.
    #[must_use = "Has no effect if the result is unused"]
    pub fn image_path(&self) -> &str {
        self.image_path.as_str()
    }

    /// The path of the answer file.
    #[must_use = "Has no effect if the result is unused"]
    pub fn template_path(&self) -> &str {
        self.template_path.as_str()
    }
}

/// The registry of currently active [`InstallTemplate`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    /// Every template in lookup order.
    templates: VecDeque<InstallTemplate>,
}

impl TemplateRegistry {
    /// Constructs an empty [`TemplateRegistry`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self {
            templates: VecDeque::new(),
        }
    }

    /// Registers a template in front of every existing one.
    ///
    /// No deduplication is done. If the image was registered before, the new template shadows the old one.
    pub fn register(&mut self, template: InstallTemplate) {
        self.templates.push_front(template);
    }

    /// Drops every template.
    pub fn clear(&mut self) {
        self.templates.clear();
    }

    /// Replaces every template with the content of another registry.
    pub fn replace(&mut self, other: Self) {
        *self = other;
    }

    /// Finds the template registered for an image.
    ///
    /// The image path must match exactly, including case. If more than one template was registered for the image,
    /// the one that was registered last is returned.
    #[must_use = "Has no effect if the result is unused"]
    pub fn lookup(&self, image_path: &str) -> Option<&InstallTemplate> {
        self.templates.iter().find(|x| x.image_path() == image_path)
    }

    /// Finds the answer file path registered for an image.
    ///
    /// See [`Self::lookup`] for how the image is matched.
    #[must_use = "Has no effect if the result is unused"]
    pub fn get_install_template(&self, image_path: &str) -> Option<&str> {
        self.lookup(image_path).map(InstallTemplate::template_path)
    }

    /// Returns an iterator over every template in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &InstallTemplate> {
        self.templates.iter()
    }

    /// The amount of registered templates.
    #[must_use = "Has no effect if the result is unused"]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Checks if no template is registered.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Logs every template in lookup order.
    pub fn dump(&self) {
        for template in self.iter() {
            info!("IMAGE:<{}>", template.image_path());
            info!("SCRIPT:<{}>", template.template_path());
        }
    }
}

impl fmt::Display for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for template in self.iter() {
            writeln!(f, "IMAGE:<{}>", template.image_path())?;
            writeln!(f, "SCRIPT:<{}>\n", template.template_path())?;
        }
        Ok(())
    }
}
