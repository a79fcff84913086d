// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Boot environment variable storage.
//!
//! Sections of the plugin configuration communicate with the rest of the boot manager by setting named string
//! variables. Where these end up is described by the [`EnvStore`] trait.
//!
//! [`UefiEnvStore`] stores them as volatile UEFI variables in a custom vendor namespace, so that they are visible
//! to anything else running during boot services without surviving a reboot.

use alloc::string::String;
use uefi::{
    Status, guid,
    runtime::{self, VariableAttributes, VariableVendor},
};

use crate::{PluginResult, error::PluginError, system::helper::str_to_cstr};

/// The custom variable namespace for the plugin environment.
const VTOY_ENV_GUID: uefi::Guid = guid!("77772020-2e77-6576-6e74-6f792e6e6574");

/// Storage for boot environment variables.
pub trait EnvStore {
    /// Sets the variable `name` to `value`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the variable could not be stored.
    fn set(&mut self, name: &str, value: &str) -> PluginResult<()>;
}

/// Environment storage backed by UEFI runtime services.
pub struct UefiEnvStore {
    /// The vendor namespace variables are stored under.
    vendor: VariableVendor,
}

impl UefiEnvStore {
    /// Constructs a new [`UefiEnvStore`] using the custom namespace.
    ///
    /// This custom namespace is accessible at GUID `77772020-2e77-6576-6e74-6f792e6e6574`.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self::with_vendor(VariableVendor(VTOY_ENV_GUID))
    }

    /// Constructs a new [`UefiEnvStore`] that stores variables under another vendor namespace.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn with_vendor(vendor: VariableVendor) -> Self {
        Self { vendor }
    }

    /// Gets a variable previously stored under `name`.
    ///
    /// Returns [`None`] if the variable does not exist.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the name could not be converted, or the variable could not be read.
    pub fn get(&self, name: &str) -> PluginResult<Option<String>> {
        let name = str_to_cstr(name)?;
        match runtime::get_variable_boxed(&name, &self.vendor) {
            Ok((data, _)) => Ok(Some(String::from_utf8_lossy(&data).into_owned())),
            Err(e) if e.status() == Status::NOT_FOUND => Ok(None),
            Err(e) => Err(PluginError::Uefi(e.to_err_without_payload())),
        }
    }
}

impl Default for UefiEnvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvStore for UefiEnvStore {
    fn set(&mut self, name: &str, value: &str) -> PluginResult<()> {
        let name = str_to_cstr(name)?;
        // an empty value deletes the variable, which reads back the same as unset
        Ok(runtime::set_variable(
            &name,
            &self.vendor,
            VariableAttributes::BOOTSERVICE_ACCESS,
            value.as_bytes(),
        )?)
    }
}
