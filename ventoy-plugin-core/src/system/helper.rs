// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Various helper functions for other modules.

use alloc::string::String;
use thiserror::Error;
use uefi::CString16;

/// An `Error` that may result from converting a [`String`] to another format.
#[derive(Error, Debug)]
pub enum StrError {
    /// A [`String`] could not be converted into a [`CString16`]
    #[error("Could not convert String to CString16")]
    CstrFromStr(#[from] uefi::data_types::FromStrError),
}

/// Gets a [`CString16`] from an [`&str`].
///
/// # Errors
///
/// May return an `Error` if the string could not be converted into a [`CString16`], either due to unsupported
/// characters or an invalid nul character.
pub(crate) fn str_to_cstr(str: &str) -> Result<CString16, StrError> {
    Ok(CString16::try_from(str)?)
}

/// Normalizes a path to make it more aligned with UEFI expectations
///
/// Currently this means replacing all forward slashes with backslashes.
#[must_use = "Has no effect if the result is unused"]
pub(crate) fn normalize_path(path: &str) -> String {
    path.replace('/', "\\")
}

/// Shortens an [`&str`] to at most `max` bytes without splitting a character.
#[must_use = "Has no effect if the result is unused"]
pub(crate) fn truncate_str(str: &str, max: usize) -> &str {
    if str.len() <= max {
        return str;
    }

    let mut end = max;
    while !str.is_char_boundary(end) {
        end -= 1; // index 0 is always a boundary, so this stops
    }
    &str[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::borrow::ToOwned;

    #[test]
    fn test_str_to_cstr() -> Result<(), StrError> {
        let cstr = str_to_cstr("vtoy_gfxmode")?;
        let str = String::from(&cstr);
        assert_eq!(str, "vtoy_gfxmode".to_owned());
        Ok(())
    }

    #[test]
    fn test_str_to_cstr_nul() {
        assert!(str_to_cstr("vtoy\0theme").is_err());
    }

    #[test]
    fn test_normalize_path() {
        let path = "/ventoy/ventoy.json";
        assert_eq!(normalize_path(path), "\\ventoy\\ventoy.json");
        let path = "\\a\\completely\\normal\\path";
        assert_eq!(normalize_path(path), path);
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("abcdef", 3), "abc");
        assert_eq!(truncate_str("abc", 3), "abc");
        assert_eq!(truncate_str("abc", 10), "abc");
        assert_eq!(truncate_str("aé", 2), "a"); // é is two bytes
        assert_eq!(truncate_str("é", 0), "");
    }
}
