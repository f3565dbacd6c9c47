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
use std::io::{self, BufReader};
use std::process::{Command, ExitStatus, Stdio};

use ccfaker_core::{rewrite_stream, VersionTriple};
use log::debug;

/// Runs `compiler` with `args`, relaying its stderr to ours with the version
/// banner rewritten.
///
/// Stdin and stdout are inherited. Stderr is drained on the calling thread
/// until the child closes it, then the child is waited on.
pub fn run_relayed<I, S>(
    compiler: &OsStr,
    args: I,
    triple: &VersionTriple,
) -> io::Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut child = Command::new(compiler)
        .args(args)
        .stderr(Stdio::piped())
        .spawn()?;

    let Some(child_stderr) = child.stderr.take() else {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "child stderr was not captured",
        ));
    };

    let relayed = rewrite_stream(BufReader::new(child_stderr), io::stderr().lock(), triple);

    // reap the child even if relaying failed half way
    let status = child.wait()?;
    let stats = relayed?;

    debug!(
        "relayed {} stderr lines ({} banners rewritten), {compiler:?} exited with {status}",
        stats.lines, stats.banners
    );

    Ok(status)
}
