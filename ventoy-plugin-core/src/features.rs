// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Stubs for features that are disabled

/// Creates an optional section.
///
/// For a section handler that implements `SectionHandler`, one should add the handler to this features file
/// in order to allow it to be disabled or enabled through the features.
///
/// This macro takes three parameters. The first of these is the feature as a string literal. This means
/// that whatever your feature is called (such as theme), it should be wrapped in double quotes as though
/// it were a string literal, like "theme".
/// The second is the feature as an identifier, and should be the name of the section handler module.
/// This should be the same as the previous parameter, without double quotes as it is not a string literal.
/// The third is the name of the struct that implements `SectionHandler`. This can be named something like
/// `ThemeSection`.
/// The final macro invocation should look something like `optional_section!("theme", theme, ThemeSection)`.
///
/// A disabled section is still recognized by the dispatcher, it simply has no effect.
macro_rules! optional_section {
    ($feature:literal, $name:ident, $section:ident) => {
        /// The handler for $section
        #[cfg(feature = $feature)]
        pub(crate) mod $name {
            pub(crate) use crate::plugin::$name::$section;
        }

        /// The disabled handler for $section
        #[cfg(not(feature = $feature))]
        pub(crate) mod $name {
            use crate::{
                document::Node,
                plugin::{PluginContext, SectionError, SectionHandler},
            };

            pub(crate) struct $section;

            impl SectionHandler for $section {
                fn apply(
                    _node: &Node,
                    _base: &str,
                    _ctx: &mut PluginContext<'_>,
                ) -> Result<(), SectionError> {
                    Ok(())
                }
            }
        }
    };
}

optional_section!("auto_install", auto_install, AutoInstallSection);
optional_section!("control", control, ControlSection);
optional_section!("theme", theme, ThemeSection);
