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

use std::io::{self, BufRead, Write};

use crate::VersionTriple;

/// Error-stream lines starting with this are treated as the version banner.
pub const BANNER_PREFIX: &[u8] = b"gcc version";

#[derive(Debug, PartialEq, Eq)]
pub enum RelayedLine<'a> {
    Banner,
    Ordinary(&'a [u8]),
}

pub fn classify(line: &[u8]) -> RelayedLine<'_> {
    if line.starts_with(BANNER_PREFIX) {
        RelayedLine::Banner
    } else {
        RelayedLine::Ordinary(line)
    }
}

pub fn banner_for(triple: &VersionTriple) -> String {
    format!("gcc version {triple} (GCC)")
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    pub lines: usize,
    pub banners: usize,
}

/// Copies `reader` to `writer` line by line, replacing every version banner
/// with one built from `triple`.
///
/// Ordinary lines are copied byte for byte, including a missing trailing
/// newline on the last line. The writer is flushed after every line.
pub fn rewrite_stream<R, W>(
    mut reader: R,
    mut writer: W,
    triple: &VersionTriple,
) -> io::Result<RewriteStats>
where
    R: BufRead,
    W: Write,
{
    let banner = banner_for(triple);
    let mut stats = RewriteStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        stats.lines += 1;

        match classify(&line) {
            RelayedLine::Banner => {
                stats.banners += 1;
                writeln!(writer, "{banner}")?;
            }
            RelayedLine::Ordinary(bytes) => writer.write_all(bytes)?,
        }

        writer.flush()?;
    }

    Ok(stats)
}
