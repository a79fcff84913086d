// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

#![no_main]

use libfuzzer_sys::fuzz_target;
use ventoy_plugin_core::{
    plugin::{PLUGIN_CONFIG_PATH, load_plugin},
    registry::TemplateRegistry,
    system::memory::{MemoryEnvStore, MemoryVolume},
};

fuzz_target!(|data: &[u8]| {
    let mut volume = MemoryVolume::new();
    volume.insert(PLUGIN_CONFIG_PATH, data);
    let mut env = MemoryEnvStore::new();
    let mut registry = TemplateRegistry::new();
    let _ = load_plugin(&mut volume, &mut env, &mut registry, "");
});
