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

//! A compiler wrapper that makes a GCC-compatible cross compiler report its
//! version the way plain GCC does.
//!
//! Installed as `<compiler>-faker`, the wrapper asks `<compiler>` for its
//! `__GNUC__` macros, then runs `<compiler>` with its own arguments and
//! replaces any `gcc version ...` line on stderr with
//! `gcc version MAJOR.MINOR.PATCH (GCC)`.

use std::ffi::OsString;
use std::process::{ExitCode, ExitStatus};

use anyhow::Context;
use log::debug;

pub mod install;
pub mod probe;
pub mod relay;
pub mod target;

pub use ccfaker_core::VersionTriple;

pub type CcFakerResult<T = ()> = anyhow::Result<T>;

/// Environment variable overriding the compiler derived from argument 0.
pub const COMPILER_OVERRIDE_ENV: &str = "CCFAKER_COMPILER";

/// One wrapped compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakerInvocation {
    pub compiler: OsString,
    pub args: Vec<OsString>,
}

impl FakerInvocation {
    pub fn new(compiler: impl Into<OsString>, args: Vec<OsString>) -> Self {
        Self {
            compiler: compiler.into(),
            args,
        }
    }

    pub fn from_args(
        argv0: OsString,
        rest: impl IntoIterator<Item = OsString>,
        compiler_override: Option<OsString>,
    ) -> CcFakerResult<Self> {
        let compiler = match compiler_override.filter(|it| !it.is_empty()) {
            Some(compiler) => compiler,
            None => target::target_from_invocation(&argv0)?,
        };

        Ok(Self::new(compiler, rest.into_iter().collect()))
    }

    /// Probes the compiler version, then runs the real invocation.
    ///
    /// The two children run one after the other, never at the same time.
    pub fn run(&self) -> CcFakerResult<ExitCode> {
        debug!("wrapping {:?} with args {:?}", self.compiler, self.args);

        let triple = probe::probe_version(&self.compiler)
            .with_context(|| format!("failed to run {:?} to dump its macros", self.compiler))?;

        let status = relay::run_relayed(&self.compiler, &self.args, &triple)
            .with_context(|| format!("failed to run {:?}", self.compiler))?;

        Ok(ExitCode::from(exit_code_of(status)))
    }
}

/// The exit code to report for a finished child: its own code if it fits,
/// 1 otherwise (for example when it was killed by a signal).
pub fn exit_code_of(status: ExitStatus) -> u8 {
    status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}
