// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Filesystem access for the plugin loader.
//!
//! The loader only ever needs two things from a volume: the full content of a file, and whether a regular file
//! exists at some path. These are described by the [`PluginVolume`] trait, so that the loader can run against
//! anything that can provide them.
//!
//! [`UefiFileSystem`] implements [`PluginVolume`] on top of the UEFI [`SimpleFileSystem`] protocol. This is
//! guaranteed to support FAT filesystems, as mandated by UEFI, and any other filesystem the
//! firmware has a driver for (exFAT and NTFS are common on Ventoy drives).
//!
//! Paths given to a [`PluginVolume`] are always separated by forward slashes, as they are written in the
//! configuration file. [`UefiFileSystem`] converts them into backslashes.

use alloc::{collections::TryReserveError, string::String, vec::Vec};
use log::debug;
use thiserror::Error;
use uefi::{
    CString16, Handle, Status,
    boot::{self, ScopedProtocol},
    proto::media::{
        file::{File, FileAttribute, FileInfo, FileMode, RegularFile},
        fs::SimpleFileSystem,
    },
};

use crate::{
    PluginResult,
    system::helper::{normalize_path, str_to_cstr},
};

/// The size of one gigabyte in bytes. This is the default value if a file is too big to be read.
///
/// This is also a reasonable maximum size for files that may be read.
pub(crate) const ONE_GIGABYTE: usize = 1024 * 1024 * 1024;

/// An error that may result from performing filesystem operations
#[derive(Error, Debug)]
pub enum FsError {
    /// A file could not be opened.
    #[error("Failed to open file")]
    OpenErr(Status),

    /// A file could not be read.
    #[error("Failed to read file")]
    ReadErr(Status),

    /// There was not enough memory for the content of a file.
    #[error("Failed to allocate buffer for file")]
    AllocErr(#[from] TryReserveError),

    /// The path could not be represented on the filesystem.
    #[error("\"{0}\" is not a valid path")]
    InvalidPath(String),
}

/// A volume from which the plugin configuration and its resources are read.
pub trait PluginVolume {
    /// Reads the entire content of a file into a [`Vec<u8>`].
    ///
    /// # Errors
    ///
    /// Should return [`FsError::OpenErr`] if the file could not be opened for any reason, including it not existing.
    /// Errors after the file was opened should be reported as [`FsError::ReadErr`] or [`FsError::AllocErr`].
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError>;

    /// Checks if a regular file exists at the path.
    ///
    /// A file that could not be verified to exist is treated as not existing.
    fn is_file(&mut self, path: &str) -> bool;
}

/// A rust-ier wrapper around [`SimpleFileSystem`].
pub struct UefiFileSystem(ScopedProtocol<SimpleFileSystem>);

impl UefiFileSystem {
    /// Create a new [`UefiFileSystem`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(fs: ScopedProtocol<SimpleFileSystem>) -> Self {
        Self(fs)
    }

    /// Create a new [`UefiFileSystem`] from a handle that supports [`SimpleFileSystem`].
    ///
    /// # Errors
    ///
    /// May return an `Error` if the handle does not actually support [`SimpleFileSystem`].
    pub fn from_handle(handle: Handle) -> PluginResult<Self> {
        let fs = boot::open_protocol_exclusive(handle)?;
        Ok(Self(fs))
    }

    /// Create a new [`UefiFileSystem`] from the same filesystem as the running image.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the boot image's filesystem does not support [`SimpleFileSystem`] for some reason.
    pub fn from_image_fs() -> PluginResult<Self> {
        let fs = boot::get_image_file_system(boot::image_handle())?;
        Ok(Self(fs))
    }

    /// Gets a handle to a [`RegularFile`] in the filesystem.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the volume couldn't be opened, or the path does not point to a file.
    fn get_regular_file(&mut self, path: &str) -> Result<RegularFile, FsError> {
        let path = to_uefi_path(path)?;
        let mut root = self
            .0
            .open_volume()
            .map_err(|e| FsError::OpenErr(e.status()))?;
        root.open(&path, FileMode::Read, FileAttribute::empty())
            .map_err(|e| FsError::OpenErr(e.status()))?
            .into_regular_file()
            .ok_or(FsError::OpenErr(Status::INVALID_PARAMETER))
    }
}

impl PluginVolume for UefiFileSystem {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        let mut file = self.get_regular_file(path)?;

        let info = file
            .get_boxed_info::<FileInfo>()
            .map_err(|e| FsError::ReadErr(e.status()))?;

        let size = usize::try_from(info.file_size()).unwrap_or(ONE_GIGABYTE);
        debug!("Reading {size} bytes from {path}");

        let mut buf = Vec::new();
        buf.try_reserve_exact(size)?; // file is closed on return if this fails
        buf.resize(size, 0);

        let read = file
            .read(&mut buf)
            .map_err(|e| FsError::ReadErr(e.status()))?;
        buf.truncate(read);

        Ok(buf)
    }

    fn is_file(&mut self, path: &str) -> bool {
        self.get_regular_file(path).is_ok()
    }
}

/// Converts a forward slash separated path into a [`CString16`] that UEFI understands.
///
/// # Errors
///
/// May return an `Error` if the path contains characters that cannot be represented in UCS-2, or a nul character.
fn to_uefi_path(path: &str) -> Result<CString16, FsError> {
    str_to_cstr(&normalize_path(path)).map_err(|_| FsError::InvalidPath(path.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_uefi_path() -> Result<(), FsError> {
        let path = to_uefi_path("/ventoy/ventoy.json")?;
        assert_eq!(String::from(&path), "\\ventoy\\ventoy.json");
        Ok(())
    }

    #[test]
    fn test_invalid_path() {
        assert!(matches!(
            to_uefi_path("/ventoy/\0.json"),
            Err(FsError::InvalidPath(_))
        ));
        assert!(matches!(
            to_uefi_path("/ventoy/\u{1F600}.png"),
            Err(FsError::InvalidPath(_))
        ));
    }
}
