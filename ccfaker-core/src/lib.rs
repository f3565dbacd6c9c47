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

//! Version banner handling for `ccfaker`.
//!
//! This crate knows how to recover a GCC version triple from a compiler's
//! predefined macro dump (`-dM -E -`), and how to rewrite the version banner
//! on a compiler's error stream into the `gcc version X.Y.Z (GCC)` form.

pub mod banner;
pub mod version;

pub use banner::{banner_for, classify, rewrite_stream, RelayedLine, RewriteStats, BANNER_PREFIX};
pub use version::{parse_macro_line, MacroDefinition, MacroLineError, VersionTriple};
