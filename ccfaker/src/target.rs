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

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub const FAKER_SUFFIX: &str = "-faker";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TargetError {
    #[error("cannot derive a compiler from {0:?}: no `-faker` in its name")]
    MissingSuffix(OsString),
    #[error("cannot derive a compiler from {0:?}: nothing before `-faker`")]
    EmptyName(OsString),
    #[error("invocation name {0:?} is not valid UTF-8")]
    NonUtf8(OsString),
}

/// Whether the file name of `argv0` contains `-faker`.
///
/// Matched on the raw bytes, so a non-UTF-8 name still selects wrapper mode
/// and is then reported by [`target_from_invocation`].
pub fn is_faker_invocation(argv0: &OsStr) -> bool {
    Path::new(argv0).file_name().is_some_and(|name| {
        name.as_encoded_bytes()
            .windows(FAKER_SUFFIX.len())
            .any(|window| window == FAKER_SUFFIX.as_bytes())
    })
}

/// `x86_64-w64-mingw32-g++-faker` -> `x86_64-w64-mingw32-g++`.
///
/// Everything from the first `-faker` on is dropped, which also takes care of
/// an `.exe` extension.
pub fn strip_faker_suffix(name: &str) -> Option<&str> {
    name.find(FAKER_SUFFIX).map(|at| &name[..at])
}

/// Works out which compiler to run from the wrapper's own argument 0.
///
/// If argument 0 has a directory component and the real compiler sits next to
/// the wrapper there, that path is used. Otherwise the bare name is returned,
/// to be looked up on `PATH` when spawned.
pub fn target_from_invocation(argv0: &OsStr) -> Result<OsString, TargetError> {
    let path = Path::new(argv0);
    let name = path
        .file_name()
        .ok_or_else(|| TargetError::MissingSuffix(argv0.to_owned()))?;
    let name = name
        .to_str()
        .ok_or_else(|| TargetError::NonUtf8(argv0.to_owned()))?;
    let target = strip_faker_suffix(name)
        .ok_or_else(|| TargetError::MissingSuffix(argv0.to_owned()))?;

    if target.is_empty() {
        return Err(TargetError::EmptyName(argv0.to_owned()));
    }

    if let Some(sibling) = sibling_of(path, target) {
        return Ok(sibling.into_os_string());
    }

    Ok(OsString::from(target))
}

fn sibling_of(wrapper: &Path, target: &str) -> Option<PathBuf> {
    let dir = wrapper.parent().filter(|dir| !dir.as_os_str().is_empty())?;
    let sibling = dir.join(target);
    sibling.is_file().then_some(sibling)
}
