// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! In-memory implementations of [`PluginVolume`] and [`EnvStore`].
//!
//! These are useful when the plugin configuration should be evaluated outside of a UEFI environment, like for
//! validating a `ventoy.json` on the host, fuzzing, or testing.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use uefi::Status;

use crate::{
    PluginResult,
    system::{
        env::EnvStore,
        fs::{FsError, PluginVolume},
    },
};

/// A volume whose files are held in memory, keyed by their full path.
#[derive(Clone, Debug, Default)]
pub struct MemoryVolume {
    /// The content of every file on the volume.
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryVolume {
    /// Constructs an empty [`MemoryVolume`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Adds a file to the volume, replacing any file already at that path.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Removes a file from the volume.
    pub fn remove(&mut self, path: &str) {
        self.files.remove(path);
    }
}

impl PluginVolume for MemoryVolume {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        let content = self
            .files
            .get(path)
            .ok_or(FsError::OpenErr(Status::NOT_FOUND))?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(content.len())?;
        buf.extend_from_slice(content);
        Ok(buf)
    }

    fn is_file(&mut self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

/// Environment variables held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryEnvStore {
    /// Every variable that was set, by name.
    vars: BTreeMap<String, String>,
}

impl MemoryEnvStore {
    /// Constructs an empty [`MemoryEnvStore`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Gets the value of a variable, if it was set.
    #[must_use = "Has no effect if the result is unused"]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// The amount of variables that are set.
    #[must_use = "Has no effect if the result is unused"]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Checks if no variable is set.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Returns an iterator over every variable and its value, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl EnvStore for MemoryEnvStore {
    fn set(&mut self, name: &str, value: &str) -> PluginResult<()> {
        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }
}
