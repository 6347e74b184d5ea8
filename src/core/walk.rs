//! Tree walks over a secret directory.
//!
//! Three modes, one per run:
//!
//! - [`search_tree`]: decrypt every `files/**/*.gpg` and print it, or only
//!   its matching lines when a pattern is given
//! - [`decrypt_tree`]: decrypt every `files/**/*.gpg` to `<root>/<stem>.txt`
//! - [`encrypt_tree`]: encrypt every `<root>/**/*.txt` to
//!   `<root>/files/<stem>.gpg` for the access list recipients
//!
//! Entries are visited in file-name order. The first error aborts the walk;
//! files already processed stay processed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use regex::bytes::Regex;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::access::resolve_access_list;
use crate::core::cipher::{decrypt_file, encrypt_file};
use crate::core::context::SecretContext;
use crate::core::search::scan_lines;
use crate::error::Result;

/// Counters reported at the end of a walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Non-directory entries seen
    pub visited: usize,
    /// Entries with the expected suffix that were processed
    pub processed: usize,
    /// Matching lines (search mode with a pattern)
    pub matches: usize,
}

/// Search or print every encrypted file under `<root>/files`.
///
/// With `pattern`, matching lines are printed grouped by file. Without it
/// the full plaintext of every file is copied to `out`.
///
/// # Errors
///
/// Returns the first walk, decryption or output error.
pub fn search_tree<W>(ctx: &SecretContext, pattern: Option<&Regex>, out: &mut W) -> Result<WalkSummary>
where
    W: Write + ?Sized,
{
    let layout = ctx.layout();
    let candidates = ctx.decryption_candidates()?;
    let unlocker = ctx.passphrase()?;
    let mut summary = WalkSummary::default();

    for path in files_under(&layout.files_dir(ctx.root())) {
        let path = path?;
        summary.visited += 1;
        if !layout.is_encrypted(&path) {
            continue;
        }

        let mut plaintext = decrypt_file(&path, candidates, unlocker)?;
        match pattern {
            Some(regex) => {
                let header = path.display().to_string();
                summary.matches += scan_lines(BufReader::new(plaintext), &header, regex, out)?;
            }
            None => {
                io::copy(&mut plaintext, out)?;
            }
        }
        summary.processed += 1;
    }

    out.flush()?;
    info!(files = summary.processed, matches = summary.matches, "search complete");
    Ok(summary)
}

/// Decrypt every encrypted file under `<root>/files` to `<root>/<stem>.txt`.
///
/// # Errors
///
/// Returns the first walk, decryption or write error.
pub fn decrypt_tree(ctx: &SecretContext) -> Result<WalkSummary> {
    let layout = ctx.layout();
    let candidates = ctx.decryption_candidates()?;
    let unlocker = ctx.passphrase()?;
    let mut summary = WalkSummary::default();

    for path in files_under(&layout.files_dir(ctx.root())) {
        let path = path?;
        summary.visited += 1;
        if !layout.is_encrypted(&path) {
            continue;
        }

        let target = layout.plaintext_target(ctx.root(), &path);
        let mut plaintext = decrypt_file(&path, candidates, unlocker)?;
        let mut file = create_private(&target)?;
        io::copy(&mut plaintext, &mut file)?;
        file.sync_all()?;

        debug!(from = %path.display(), to = %target.display(), "decrypted");
        summary.processed += 1;
    }

    info!(files = summary.processed, "decrypt complete");
    Ok(summary)
}

/// Encrypt every plaintext file under `<root>` into `<root>/files`.
///
/// The access list is resolved before the walk starts, so an unknown
/// recipient fails the run before any file is written.
///
/// # Errors
///
/// Returns recipient resolution errors, or the first walk or encryption
/// error.
pub fn encrypt_tree(ctx: &SecretContext) -> Result<WalkSummary> {
    let layout = ctx.layout();
    let recipients = resolve_access_list(ctx.root(), layout, ctx.public_ring()?)?;
    let mut summary = WalkSummary::default();

    for path in files_under(ctx.root()) {
        let path = path?;
        summary.visited += 1;
        if !layout.is_plaintext(&path) {
            continue;
        }

        let target = layout.encrypted_target(ctx.root(), &path);
        encrypt_file(&path, &recipients, &target)?;

        debug!(from = %path.display(), to = %target.display(), "encrypted");
        summary.processed += 1;
    }

    info!(files = summary.processed, recipients = recipients.len(), "encrypt complete");
    Ok(summary)
}

/// Non-directory entries below `dir`, sorted by file name.
fn files_under(dir: &Path) -> impl Iterator<Item = Result<PathBuf>> {
    debug!(dir = %dir.display(), "walking");
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) => Some(Ok(entry.into_path())),
            Err(e) => Some(Err(e.into())),
        })
}

/// Create or truncate a plaintext output readable only by the owner.
fn create_private(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = options.open(path)?;

    // mode() only applies on creation; an overwritten file keeps its own
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    Ok(file)
}
