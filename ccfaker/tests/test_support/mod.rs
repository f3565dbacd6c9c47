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
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use indoc::indoc;
use tempfile::TempDir;

pub type R<T = ()> = anyhow::Result<T>;

pub const CCFAKER: &str = env!("CARGO_BIN_EXE_ccfaker");

pub const DEFAULT_MACRO_DUMP: &str = indoc! {r#"
    #define __STDC__ 1
    #define __GNUC_PATCHLEVEL__ 0
    #define __x86_64__ 1
    #define __GNUC__ 11
    #define __VERSION__ "11.2.0 (vendor build)"
    #define __GNUC_MINOR__ 2
"#};

// Only shell builtins are used, so the script runs with any PATH.
const COMPILER_BODY: &str = indoc! {r#"
    if [ "$1" = "read-stdin" ]; then
        while IFS= read -r line; do
            printf 'stdin:%s\n' "$line"
        done
        exit 0
    fi
    for arg in "$@"; do
        printf 'arg:%s\n' "$arg"
    done
    printf 'Target: mock\n' >&2
    printf 'gcc version 10-win32 20220113 (GCC)\n' >&2
    printf 'warning: something\n' >&2
    printf 'no newline at end' >&2
    exit "${MOCKCC_EXIT:-0}"
"#};

/// Stderr the mock compiler produces for a regular invocation, with its
/// banner already rewritten to `banner`.
pub fn expected_stderr(banner: &str) -> String {
    format!("Target: mock\n{banner}\nwarning: something\nno newline at end")
}

/// A temporary directory holding a mock GCC-compatible compiler.
pub struct MockToolchain {
    dir: TempDir,
    name: &'static str,
}

impl MockToolchain {
    pub fn new(name: &'static str) -> R<Self> {
        Self::with_macro_dump(name, DEFAULT_MACRO_DUMP)
    }

    pub fn with_macro_dump(name: &'static str, dump: &str) -> R<Self> {
        Self::build(name, dump, None)
    }

    /// A compiler that also prints `dump_stderr` on stderr in macro dump mode.
    pub fn with_dump_stderr(name: &'static str, dump_stderr: &str) -> R<Self> {
        Self::build(name, DEFAULT_MACRO_DUMP, Some(dump_stderr))
    }

    fn build(name: &'static str, dump: &str, dump_stderr: Option<&str>) -> R<Self> {
        let dir = tempfile::tempdir()?;
        let toolchain = Self { dir, name };
        toolchain.write_compiler(dump, dump_stderr)?;
        Ok(toolchain)
    }

    fn write_compiler(&self, dump: &str, dump_stderr: Option<&str>) -> R {
        let mut script = String::from("#!/bin/sh\n");
        script.push_str("if [ \"$1\" = \"-dM\" ] && [ \"$2\" = \"-E\" ] && [ \"$3\" = \"-\" ]; then\n");
        if let Some(line) = dump_stderr {
            script.push_str(&format!("    printf '%s\\n' '{line}' >&2\n"));
        }
        for line in dump.lines() {
            script.push_str(&format!("    printf '%s\\n' '{line}'\n"));
        }
        script.push_str("    exit 0\nfi\n");
        script.push_str(COMPILER_BODY);

        let path = self.compiler_path();
        std::fs::write(&path, script)?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn compiler_path(&self) -> PathBuf {
        self.dir().join(self.name)
    }

    /// Links `<dir>/<link_name>` to the ccfaker binary.
    pub fn link_faker(&self, dir: &Path, link_name: &str) -> R<PathBuf> {
        let link = dir.join(link_name);
        std::os::unix::fs::symlink(CCFAKER, &link)?;
        Ok(link)
    }

    /// `<compiler>-faker`, next to the mock compiler.
    pub fn faker(&self) -> R<Command> {
        let link = self.link_faker(self.dir(), &format!("{}-faker", self.name))?;
        Ok(command(link))
    }
}

pub fn command(program: impl AsRef<OsStr>) -> Command {
    let mut cmd = Command::new(program);
    cmd.env_remove("CCFAKER_COMPILER")
        .env_remove("CCFAKER_LOG")
        .env_remove("MOCKCC_EXIT")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

pub fn ccfaker() -> Command {
    command(CCFAKER)
}

pub trait OutputExt {
    fn stdout_str(&self) -> String;
    fn stderr_str(&self) -> String;
    fn assert_success(&self) -> R;
}

impl OutputExt for Output {
    fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    fn assert_success(&self) -> R {
        if !self.status.success() {
            println!("stdout: {}", self.stdout_str());
            eprintln!("stderr: {}", self.stderr_str());
            anyhow::bail!("command failed with status: {}", self.status);
        }

        Ok(())
    }
}
