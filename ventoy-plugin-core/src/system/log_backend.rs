// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Simple UEFI backend for the [`log`] crate.
//!
//! Sections log skipped elements at the debug level, so a [`PluginLogger`] constructed with
//! [`log::LevelFilter::Debug`] is the easiest way of finding out why part of a `ventoy.json` was ignored.

use core::fmt::Write;

use alloc::boxed::Box;
use log::{LevelFilter, Metadata, Record};
use uefi::{runtime, system::with_stdout};

/// A simple logging backend for UEFI.
pub struct PluginLogger {
    /// The most verbose level that is printed.
    level: LevelFilter,
}

impl PluginLogger {
    /// Constructs a new [`PluginLogger`] that prints records at the given level or below.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Constructs a new [`PluginLogger`], then immediately leaks it so that it can be used with `set_logger`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn static_new(level: LevelFilter) -> &'static Self {
        Box::leak(Box::new(Self::new(level)))
    }
}

impl Default for PluginLogger {
    fn default() -> Self {
        Self::new(LevelFilter::Info)
    }
}

impl log::Log for PluginLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let time = runtime::get_time().unwrap_or(runtime::Time::invalid());
            let level = record.level();
            let file = record.file().unwrap_or_default();
            let line = record.line().unwrap_or_default();
            let args = record.args();
            with_stdout(|stdout| {
                let _ = stdout.write_fmt(format_args!("[{time} {level} {file}:{line}] - {args}\n"));
            });
        }
    }

    fn flush(&self) {}
}
