/*
 *        Copyright (c) 2023-2024 Dinu Blanovschi
 *
 *    Licensed under the Apache License, Version 2.0 (the "License");
 *    you may not use this file except in compliance with the License.
 *    You may obtain a copy of the License at
 *
 *        https://www.apache.org/licenses/LICENSE-2.0
 *
 *    Unless required by applicable law or agreed to in writing, software
 *    distributed under the License is distributed on an "AS IS" BASIS,
 *    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *    See the License for the specific language governing permissions and
 *    limitations under the License.
 */

use std::fmt::{self, Display, Formatter};

use log::debug;

pub const GNUC_MAJOR_MACRO: &str = "__GNUC__";
pub const GNUC_MINOR_MACRO: &str = "__GNUC_MINOR__";
pub const GNUC_PATCHLEVEL_MACRO: &str = "__GNUC_PATCHLEVEL__";

/// Rendered in place of a version component the compiler did not define.
pub const UNSET_PLACEHOLDER: &str = "None";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MacroLineError {
    #[error("macro dump line has fewer than two tokens: {line:?}")]
    TooFewTokens { line: String },
}

/// A single `#define NAME VALUE...` line of a macro dump.
#[derive(Debug, PartialEq, Eq)]
pub struct MacroDefinition<'a> {
    pub name: &'a str,
    /// The remaining tokens, joined with single spaces.
    pub value: String,
}

/// Parses one line of a macro dump.
///
/// The first token (normally `#define`) is not inspected; the second token is
/// the macro name, and everything after it is the value.
pub fn parse_macro_line(line: &str) -> Result<MacroDefinition<'_>, MacroLineError> {
    let mut tokens = line.split_whitespace();

    let (Some(_), Some(name)) = (tokens.next(), tokens.next()) else {
        return Err(MacroLineError::TooFewTokens {
            line: line.to_owned(),
        });
    };

    let value = tokens.collect::<Vec<_>>().join(" ");

    Ok(MacroDefinition { name, value })
}

/// The `(major, minor, patch)` version reported by a compiler's
/// `__GNUC__`, `__GNUC_MINOR__` and `__GNUC_PATCHLEVEL__` macros.
#[derive(serde::Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct VersionTriple {
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

impl VersionTriple {
    pub fn new(
        major: impl Into<String>,
        minor: impl Into<String>,
        patch: impl Into<String>,
    ) -> Self {
        Self {
            major: Some(major.into()),
            minor: Some(minor.into()),
            patch: Some(patch.into()),
        }
    }

    /// Extracts the triple from the output of `cc -dM -E -`.
    ///
    /// Lines can come in any order. Malformed lines and unrelated macros are
    /// skipped, and a macro that never shows up leaves its field unset.
    pub fn from_macro_dump(dump: &str) -> Self {
        let mut triple = Self::default();

        for line in dump.lines() {
            let def = match parse_macro_line(line) {
                Ok(def) => def,
                Err(e) => {
                    debug!("skipping macro dump line: {e}");
                    continue;
                }
            };

            let slot = match def.name {
                GNUC_MAJOR_MACRO => &mut triple.major,
                GNUC_MINOR_MACRO => &mut triple.minor,
                GNUC_PATCHLEVEL_MACRO => &mut triple.patch,
                _ => continue,
            };

            *slot = Some(def.value);
        }

        triple
    }

    pub fn from_macro_dump_bytes(dump: &[u8]) -> Self {
        Self::from_macro_dump(&String::from_utf8_lossy(dump))
    }

    pub fn is_complete(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }
}

fn component(f: &mut Formatter<'_>, c: &Option<String>) -> fmt::Result {
    f.write_str(c.as_deref().unwrap_or(UNSET_PLACEHOLDER))
}

impl Display for VersionTriple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        component(f, &self.major)?;
        f.write_str(".")?;
        component(f, &self.minor)?;
        f.write_str(".")?;
        component(f, &self.patch)
    }
}
