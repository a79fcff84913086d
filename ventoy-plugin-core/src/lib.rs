// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The `ventoy-plugin` library crate.
//!
//! This loads the `ventoy/ventoy.json` plugin configuration from a boot volume and applies its sections. Each
//! recognized top-level key is handed to a dedicated handler, which either writes boot environment variables or
//! rebuilds the [`registry::TemplateRegistry`] of unattended install templates.
//!
//! The filesystem and the environment store are reached through the [`system::fs::PluginVolume`] and
//! [`system::env::EnvStore`] traits. UEFI implementations of both are provided, as well as in-memory ones in
//! [`system::memory`] for hosted use.
//!
//! ```no_run
//! use ventoy_plugin_core::{
//!     plugin::load_plugin,
//!     registry::TemplateRegistry,
//!     system::{env::UefiEnvStore, fs::UefiFileSystem},
//! };
//!
//! let mut fs = UefiFileSystem::from_image_fs().expect("Failed to open image filesystem");
//! let mut env = UefiEnvStore::new();
//! let mut registry = TemplateRegistry::new();
//!
//! load_plugin(&mut fs, &mut env, &mut registry, "").expect("Malformed ventoy.json");
//! let template = registry.get_install_template("/iso/debian.iso");
//! ```
//!
//! ## MSRV
//!
//! The minimum supported rust version is 1.88.0.

#![cfg_attr(not(any(fuzzing, test, doctest)), no_std)]

/// The primary result type that wraps around [`crate::error::PluginError`].
pub type PluginResult<T> = Result<T, crate::error::PluginError>;

pub mod document;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod system;
pub mod types;

mod features;

extern crate alloc;
