// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! `newtype` definitions for values taken from the plugin configuration.
//!
//! At the moment, this includes the following type definitions:
//! - [`BoundedPath`] (constructor will truncate the path to at most [`MAX_PATH`] - 1 bytes)

use core::ops::Deref;

use alloc::{borrow::ToOwned, string::String};
use log::warn;

use crate::system::helper::truncate_str;

/// The max length of a path, including the nul terminator that the boot environment expects.
pub const MAX_PATH: usize = 256;

/// A newtype wrapper around a path that is guaranteed to fit a [`MAX_PATH`] sized buffer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BoundedPath(String);

impl BoundedPath {
    /// Creates a new [`BoundedPath`].
    ///
    /// Paths that are too long are not rejected. Instead, they are truncated at the last character boundary that
    /// still fits, and a warning is logged.
    #[must_use = "Has no effect if the result is unused"]
    pub fn new(path: &str) -> Self {
        let bounded = truncate_str(path, MAX_PATH - 1);
        if bounded.len() != path.len() {
            warn!(
                "Path \"{path}\" is longer than {} bytes and was truncated",
                MAX_PATH - 1
            );
        }
        Self(bounded.to_owned())
    }

    /// Returns the path as an [`&str`].
    #[must_use = "Has no effect if the result is unused"]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for BoundedPath {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<BoundedPath> for String {
    fn from(value: BoundedPath) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_short_path() {
        let path = BoundedPath::new("/iso/ubuntu-24.04-live-server-amd64.iso");
        assert_eq!(path.as_str(), "/iso/ubuntu-24.04-live-server-amd64.iso");
    }

    #[test]
    fn test_long_path() {
        let long = format!("/{}", "a".repeat(400));
        let path = BoundedPath::new(&long);
        assert_eq!(path.len(), MAX_PATH - 1);
        assert!(long.starts_with(path.as_str()));
    }

    #[test]
    fn test_exact_fit() {
        let exact = format!("/{}", "b".repeat(MAX_PATH - 2));
        assert_eq!(BoundedPath::new(&exact).as_str(), exact);
    }

    #[test]
    fn test_multibyte_boundary() {
        // 254 ascii bytes followed by a 3 byte character, which would end past the limit
        let path = format!("{}{}", "c".repeat(254), '€');
        let bounded = BoundedPath::new(&path);
        assert_eq!(bounded.len(), 254);
        assert!(!bounded.contains('€'));
    }

    proptest! {
        #[test]
        fn always_bounded(x in any::<String>()) {
            let path = BoundedPath::new(&x);
            prop_assert!(path.len() < MAX_PATH);
            prop_assert!(x.starts_with(path.as_str()));
        }
    }
}
