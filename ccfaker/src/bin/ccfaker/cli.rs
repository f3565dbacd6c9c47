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

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use ccfaker::{install, probe, CcFakerResult, FakerInvocation};
use clap::{Args, Parser};

#[derive(Parser, Debug)]
#[clap(name = "ccfaker", version, about)]
pub enum App {
    /// Run a compiler, rewriting its version banner on stderr.
    ///
    /// This is what a `<compiler>-faker` link does, with the compiler
    /// given explicitly.
    Run(RunCommand),
    /// Print the version a compiler reports through its `__GNUC__` macros.
    Probe(ProbeCommand),
    /// Create a `<compiler>-faker` link to this executable.
    Install(InstallCommand),
}

#[derive(Args, Debug)]
pub struct CompilerArg {
    /// The compiler to wrap, either a path or a name looked up on `PATH`.
    #[clap(long)]
    pub compiler: OsString,
}

#[derive(Args, Debug)]
pub struct RunCommand {
    #[clap(flatten)]
    pub compiler: CompilerArg,
    /// Arguments passed to the compiler as-is.
    #[clap(last = true)]
    pub args: Vec<OsString>,
}

#[derive(Args, Debug)]
pub struct ProbeCommand {
    #[clap(flatten)]
    pub compiler: CompilerArg,
    /// Print the version as a JSON object instead of `MAJOR.MINOR.PATCH`.
    #[clap(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InstallCommand {
    /// The name of the compiler, as it is found on `PATH`.
    #[clap(long)]
    pub compiler: String,
    /// Where to create the link.
    ///
    /// Defaults to the directory this executable is in.
    #[clap(long)]
    pub dir: Option<PathBuf>,
    /// Replace an existing file of the same name.
    #[clap(long)]
    pub force: bool,
}

impl App {
    pub fn run(self) -> CcFakerResult<ExitCode> {
        match self {
            App::Run(cmd) => FakerInvocation::new(cmd.compiler.compiler, cmd.args).run(),
            App::Probe(cmd) => {
                cmd.run()?;
                Ok(ExitCode::SUCCESS)
            }
            App::Install(cmd) => {
                cmd.run()?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

impl ProbeCommand {
    fn run(self) -> CcFakerResult {
        let compiler = &self.compiler.compiler;
        let triple = probe::probe_version(compiler)
            .with_context(|| format!("failed to run {compiler:?} to dump its macros"))?;

        if self.json {
            println!("{}", serde_json::to_string(&triple)?);
        } else {
            println!("{triple}");
        }

        Ok(())
    }
}

impl InstallCommand {
    fn run(self) -> CcFakerResult {
        let exe = std::env::current_exe().context("cannot locate the ccfaker executable")?;

        let dir = match self.dir {
            Some(dir) => dir,
            None => exe
                .parent()
                .context("the ccfaker executable has no parent directory")?
                .to_path_buf(),
        };

        let link = install::install_faker(&self.compiler, &dir, &exe, self.force)?;
        println!("{}", link.display());

        Ok(())
    }
}
