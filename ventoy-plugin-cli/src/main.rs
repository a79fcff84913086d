// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A command line interface frontend to `ventoy-plugin`.
//!
//! This loads the plugin configuration from the volume the application was started from, applies it to the
//! UEFI environment, and optionally shows the install templates it registered.

#![no_main]
#![no_std]

extern crate alloc;

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use getargs::{Arg, Options};
use uefi::{Status, boot, cstr16, entry, println, proto::loaded_image::LoadedImage};
use ventoy_plugin_core::{
    PluginResult,
    plugin::load_plugin,
    registry::TemplateRegistry,
    system::{env::UefiEnvStore, fs::UefiFileSystem, log_backend::PluginLogger},
};

/// The global logging instance.
static LOGGER: PluginLogger = PluginLogger::new(log::LevelFilter::Warn);

/// What to do once the configuration is loaded.
enum Request {
    /// Print every registered template.
    Dump,

    /// Print the template registered for an image.
    Template(String),
}

/// The actual main function of the program.
///
/// # Errors
///
/// May return an `Error` if the program could not obtain the `LoadedImage` protocol, the filesystem it was loaded
/// from, or if the plugin configuration is malformed.
fn main_func() -> PluginResult<()> {
    uefi::helpers::init()?; // initialize helpers (for print)

    let load_options = {
        let handle = boot::image_handle();
        let loaded_image = boot::open_protocol_exclusive::<LoadedImage>(handle)?;
        loaded_image
            .load_options_as_cstr16()
            .unwrap_or(cstr16!("ventoy-plugin-cli.efi")) // there is at least one argument, which is the filename
            .to_string()
    }; // loaded_image dropped here

    let mut options = load_options.split_whitespace();

    let Some(app_filename) = options.next() else {
        println!("Error: No load options were passed to the program");
        return Ok(());
    };

    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Warn));

    let mut base = String::new();
    let mut requests = Vec::new();

    let mut opts = Options::new(options);
    while let Ok(Some(arg)) = opts.next_arg() {
        match arg {
            Arg::Short('b') | Arg::Long("base") => {
                let Ok(value) = opts.value() else {
                    println!("Error: A path was not passed into the base argument");
                    return Ok(());
                };
                base = value.trim_end_matches('/').to_string();
            }
            Arg::Short('d') | Arg::Long("dump") => requests.push(Request::Dump),
            Arg::Short('t') | Arg::Long("template") => {
                let Ok(value) = opts.value() else {
                    println!("Error: An image path was not passed into the template argument");
                    return Ok(());
                };
                requests.push(Request::Template(value.to_string()));
            }
            Arg::Short('h') | Arg::Long("help") => {
                print_usage(app_filename);
                return Ok(());
            }
            Arg::Short(invalid) => println!("Error: Unknown short argument: -{invalid}"),
            Arg::Long(invalid) => println!("Error: Unknown long argument: --{invalid}"),
            Arg::Positional(invalid) => println!("Error: Unknown positional argument: {invalid}"),
        }
    }

    let mut fs = UefiFileSystem::from_image_fs()?;
    let mut env = UefiEnvStore::new();
    let mut registry = TemplateRegistry::new();

    load_plugin(&mut fs, &mut env, &mut registry, &base)?;

    for request in requests {
        match request {
            Request::Dump => println!("{registry}"),
            Request::Template(image) => match registry.get_install_template(&image) {
                Some(template) => println!("{template}"),
                None => println!("No install template for {image}"),
            },
        }
    }

    Ok(())
}

/// Prints how the program is used.
fn print_usage(app_filename: &str) {
    println!(
        r"Usage: {app_filename} [OPTIONS]...

-h, --help              display this help and exit
-b, --base <PATH>       load <PATH>/ventoy/ventoy.json instead of /ventoy/ventoy.json
-d, --dump              display every registered install template
-t, --template <IMAGE>  display the install template registered for an image
"
    );
}

/// The main function of the program.
///
/// This will not panic on a fatal error, rather, it will return control to the UEFI shell (or the firmware menu).
/// This program is intended to be ran as a shell script, so panicking here would not make any sense.
#[entry]
fn main() -> Status {
    main_func().map_or_else(
        |e| {
            println!("Error: {e}");
            Status::ABORTED
        },
        |()| Status::SUCCESS,
    )
}
