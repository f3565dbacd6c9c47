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

use std::path::{Path, PathBuf};
use std::{fs, io};

use log::info;

use crate::target::FAKER_SUFFIX;

#[derive(thiserror::Error, Debug)]
pub enum InstallError {
    #[error("{0:?} is not a plain compiler name")]
    InvalidCompilerName(String),
    #[error("{} already exists (pass --force to replace it)", .0.display())]
    AlreadyExists(PathBuf),
    #[error("IO error: {0}")]
    IO(#[from] io::Error),
}

/// The file name a wrapper for `compiler` is installed under.
pub fn faker_file_name(compiler: &str) -> String {
    format!("{compiler}{FAKER_SUFFIX}{}", std::env::consts::EXE_SUFFIX)
}

/// Creates `dir/<compiler>-faker` pointing at `exe`.
///
/// On unix this is a symlink; elsewhere `exe` is copied.
pub fn install_faker(
    compiler: &str,
    dir: &Path,
    exe: &Path,
    force: bool,
) -> Result<PathBuf, InstallError> {
    let is_plain_name = !compiler.is_empty()
        && Path::new(compiler).file_name().and_then(|it| it.to_str()) == Some(compiler);
    if !is_plain_name {
        return Err(InstallError::InvalidCompilerName(compiler.to_owned()));
    }

    let link = dir.join(faker_file_name(compiler));

    if fs::symlink_metadata(&link).is_ok() {
        if !force {
            return Err(InstallError::AlreadyExists(link));
        }

        fs::remove_file(&link)?;
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(exe, &link)?;
    #[cfg(not(unix))]
    fs::copy(exe, &link)?;

    info!("installed {} -> {}", link.display(), exe.display());

    Ok(link)
}
