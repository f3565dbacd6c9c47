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

use std::process::ExitCode;

use ccfaker::{target, CcFakerResult, FakerInvocation, COMPILER_OVERRIDE_ENV};
use clap::Parser;
use cli::App;

mod cli;

fn main_impl() -> CcFakerResult<ExitCode> {
    pretty_env_logger::formatted_builder()
        .parse_env("CCFAKER_LOG")
        .init();

    let mut args = std::env::args_os();
    let argv0 = args.next().unwrap_or_default();

    if target::is_faker_invocation(&argv0) {
        let compiler_override = std::env::var_os(COMPILER_OVERRIDE_ENV);
        return FakerInvocation::from_args(argv0, args, compiler_override)?.run();
    }

    App::parse().run()
}

fn main() -> ExitCode {
    match main_impl() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ccfaker: {e:#}");
            ExitCode::FAILURE
        }
    }
}
