//! Line search over decrypted content.
//!
//! Output format for a file with matches:
//!
//! ```text
//! <path>
//! <lineNumber>:<lineText>
//! ...
//! <blank line>
//! ```
//!
//! Files without matches print nothing. Matching is unanchored and runs
//! over raw bytes, so non-UTF-8 secrets are searchable too.

use std::io::{BufRead, Write};

use regex::bytes::Regex;
use tracing::trace;

use crate::error::Result;

/// Compile a search pattern. An absent or empty pattern means "print
/// everything" and yields `None`.
///
/// # Errors
///
/// Returns `Error::Regex` if the pattern does not compile.
pub fn compile_pattern(pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern {
        Some(p) if !p.is_empty() => Ok(Some(Regex::new(p)?)),
        _ => Ok(None),
    }
}

/// Scan `reader` line by line and print matches under `header`.
///
/// Lines are split on `\n` with a trailing `\r` removed and numbered from 1.
/// Returns the number of matching lines.
///
/// # Errors
///
/// Returns `Error::Io` if reading or writing fails.
pub fn scan_lines<R, W>(reader: R, header: &str, regex: &Regex, out: &mut W) -> Result<usize>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut matches = 0;

    for (index, line) in reader.split(b'\n').enumerate() {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        if !regex.is_match(&line) {
            continue;
        }

        if matches == 0 {
            writeln!(out, "{}", header)?;
        }
        matches += 1;

        write!(out, "{}:", index + 1)?;
        out.write_all(&line)?;
        out.write_all(b"\n")?;
    }

    if matches > 0 {
        writeln!(out)?;
    }

    trace!(header, matches, "scanned");
    Ok(matches)
}
