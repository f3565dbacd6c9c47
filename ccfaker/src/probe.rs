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

use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};

use ccfaker_core::VersionTriple;
use log::{debug, warn};

/// Makes a GCC-compatible driver print its predefined macros for an empty
/// translation unit read from stdin.
pub const MACRO_DUMP_ARGS: [&str; 3] = ["-dM", "-E", "-"];

/// Asks `compiler` for its `__GNUC__` version macros.
///
/// Only stdout is captured; whatever the compiler prints on stderr goes
/// straight to ours. Only a failure to spawn the compiler is an error. A
/// compiler that rejects the flags, or that does not define the macros,
/// yields a triple with unset fields.
pub fn probe_version(compiler: &OsStr) -> io::Result<VersionTriple> {
    debug!("probing {compiler:?} {}", MACRO_DUMP_ARGS.join(" "));

    let output = Command::new(compiler)
        .args(MACRO_DUMP_ARGS)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()?;

    if !output.status.success() {
        warn!("macro dump of {compiler:?} exited with {}", output.status);
    }

    let triple = VersionTriple::from_macro_dump_bytes(&output.stdout);

    if triple.is_complete() {
        debug!("{compiler:?} reports version {triple}");
    } else {
        warn!("{compiler:?} did not report a full version: {triple}");
    }

    Ok(triple)
}
