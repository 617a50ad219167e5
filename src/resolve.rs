//! Entry resolution: stat each path, read symlink targets, enumerate
//! directory contents, and feed the column-width accumulator.
//!
//! Failures here are partial by design: an unreadable path is reported and
//! dropped, an unreadable child is reported and skipped, and an unreadable
//! directory body still surfaces the directory itself as a childless entry.

use std::fmt::Display;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::cli::ListConfig;
use crate::entry::{Entry, EntryKind, LinkTarget, SortedEntries};
use crate::meta::{FileStat, MetadataSource};
use crate::widths::ColumnWidths;

/// Fixed identity substituted in deterministic test runs.
const TEST_UID: u32 = 42;
const TEST_GID: u32 = 42;
const TEST_OWNER: &str = "tester";
const TEST_GROUP: &str = "testgrp";

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The path (or a directory body) could not be opened or stat'ed.
    #[error("cannot access '{name}': {source}")]
    Access { name: String, source: io::Error },
    /// Directory iteration failed mid-stream.
    #[error("cannot read directory '{name}': {source}")]
    ReadDir { name: String, source: io::Error },
}

/// Coarse classification of a resolution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    AccessDenied,
    NotFound,
    Other,
}

impl ResolveError {
    pub fn kind(&self) -> FailureKind {
        let source = match self {
            ResolveError::Access { source, .. } | ResolveError::ReadDir { source, .. } => source,
        };
        match source.kind() {
            io::ErrorKind::PermissionDenied => FailureKind::AccessDenied,
            io::ErrorKind::NotFound => FailureKind::NotFound,
            _ => FailureKind::Other,
        }
    }
}

/// Program-prefixed diagnostic on stderr.
pub(crate) fn warn(message: impl Display) {
    eprintln!("lsl: {message}");
}

/// Resolve one command-line path into a fully populated entry.
///
/// `Err` means the initial stat failed and the path yields no entry at all.
/// Directory-content failures are reported here and produce a childless
/// directory entry instead.
pub fn resolve_path(
    source: &dyn MetadataSource,
    config: &ListConfig,
    widths: &mut ColumnWidths,
    path: &Path,
) -> Result<Entry, ResolveError> {
    let name = path.to_string_lossy().into_owned();
    let st = source.stat(path).map_err(|e| ResolveError::Access {
        name: name.clone(),
        source: e,
    })?;

    let mut entry = fill_entry(source, config, path, name, st);
    if st.is_dir() {
        match resolve_children(source, config, widths, path) {
            Ok((children, blocks)) => {
                entry.blocks = blocks;
                entry.kind = EntryKind::Directory(children);
            }
            Err(err) => {
                // Keep the directory itself; its metadata did resolve.
                warn(&err);
                entry.blocks = 0;
            }
        }
    } else {
        // Top-level directories get no metadata row of their own, so only
        // the other entries participate in the column widths.
        widths.observe(&entry);
    }
    Ok(entry)
}

/// Enumerate a directory: skip dotfiles, stat each child at `dir/child`,
/// skip children that fail to stat, and sum the blocks of the rest.
fn resolve_children(
    source: &dyn MetadataSource,
    config: &ListConfig,
    widths: &mut ColumnWidths,
    dir: &Path,
) -> Result<(SortedEntries, u64), ResolveError> {
    let dir_name = dir.to_string_lossy();
    let names = source.open_dir(dir).map_err(|e| ResolveError::Access {
        name: dir_name.clone().into_owned(),
        source: e,
    })?;

    let mut children = SortedEntries::new();
    let mut blocks: u64 = 0;
    for item in names {
        let child_name = item.map_err(|e| ResolveError::ReadDir {
            name: dir_name.clone().into_owned(),
            source: e,
        })?;

        // Hidden entries stay out of the listing and out of the block total.
        if child_name.starts_with('.') {
            continue;
        }

        let child_path = dir.join(&child_name);
        let st = match source.stat(&child_path) {
            Ok(st) => st,
            Err(e) => {
                warn(ResolveError::Access {
                    name: child_name,
                    source: e,
                });
                continue;
            }
        };

        blocks += st.blocks;
        let child = fill_entry(source, config, &child_path, child_name, st);
        widths.observe(&child);
        children.insert(child);
    }
    Ok((children, blocks))
}

/// Populate the scalar fields of one entry from its stat results.
fn fill_entry(
    source: &dyn MetadataSource,
    config: &ListConfig,
    path: &Path,
    name: String,
    st: FileStat,
) -> Entry {
    let (uid, gid, owner, group) = if config.test_mode {
        (
            TEST_UID,
            TEST_GID,
            Some(TEST_OWNER.to_string()),
            Some(TEST_GROUP.to_string()),
        )
    } else {
        // Owner and group lookups fail independently of each other.
        (
            st.uid,
            st.gid,
            source.user_name(st.uid),
            source.group_name(st.gid),
        )
    };

    let link_target = if st.is_symlink() {
        Some(read_link_target(source, path, &name, st.size))
    } else {
        None
    };

    Entry {
        name,
        mode: st.mode,
        nlink: st.nlink,
        uid,
        gid,
        owner,
        group,
        size: st.size,
        blocks: st.blocks,
        mtime: st.mtime,
        link_target,
        kind: if st.is_dir() {
            EntryKind::Directory(SortedEntries::new())
        } else {
            EntryKind::File
        },
    }
}

/// Read a symlink target. The buffer is sized to the reported link size plus
/// one; a link that reports size zero (procfs and friends) falls back to the
/// platform maximum. A target filling the whole buffer may have changed
/// during the read and is cut at the buffer boundary.
fn read_link_target(
    source: &dyn MetadataSource,
    path: &Path,
    name: &str,
    size: u64,
) -> LinkTarget {
    let bufsz = if size > 0 {
        size as usize + 1
    } else {
        libc::PATH_MAX as usize + 1
    };
    match source.read_link(path, bufsz) {
        Ok(mut text) => {
            if text.len() >= bufsz {
                let mut end = bufsz - 1;
                while !text.is_char_boundary(end) {
                    end -= 1;
                }
                text.truncate(end);
            }
            LinkTarget::Resolved(text)
        }
        Err(e) => {
            warn(format_args!("cannot read link '{name}': {e}"));
            LinkTarget::Unreadable
        }
    }
}
