//! Long-format report rendering.
//!
//! Everything fallible happened during resolution; this stage only formats
//! already-collected entries and streams them to a writer.

use std::io::{self, Write};

use chrono::{DateTime, Datelike, Local, TimeZone};

use crate::cli::ListConfig;
use crate::entry::{Entry, LinkTarget, SortedEntries};
use crate::widths::ColumnWidths;

/// Fixed timestamp text substituted in deterministic test runs.
const TEST_TIMESTAMP: &str = "Jan  3 11:12:42";

/// Write the whole report: rows for non-directory entries first, then one
/// block per directory entry, each introduced by a `total` line and, when
/// several top-level entries are listed, by a `<name>:` prefix.
pub fn render_report<W: Write>(
    out: &mut W,
    entries: &SortedEntries,
    widths: &ColumnWidths,
    config: &ListConfig,
) -> io::Result<()> {
    let now = Local::now();
    let mut wrote_any = false;

    for entry in entries.iter().filter(|e| !e.is_dir()) {
        write_row(out, entry, widths, config, &now)?;
        wrote_any = true;
    }

    // A name prefix disambiguates which directory each block belongs to.
    let show_prefix = entries.len() > 1;
    for entry in entries.iter().filter(|e| e.is_dir()) {
        if wrote_any {
            writeln!(out)?;
        }
        if show_prefix {
            writeln!(out, "{}:", entry.name)?;
        }
        let total = if config.posix_blocks {
            entry.blocks / 2
        } else {
            entry.blocks
        };
        writeln!(out, "total {total}")?;
        if let Some(children) = entry.children() {
            for child in children {
                write_row(out, child, widths, config, &now)?;
            }
        }
        wrote_any = true;
    }
    Ok(())
}

/// One `ls -l` row: mode, links, owner, group, size, time, name, and the
/// symlink target when there is one.
fn write_row<W: Write>(
    out: &mut W,
    entry: &Entry,
    widths: &ColumnWidths,
    config: &ListConfig,
    now: &DateTime<Local>,
) -> io::Result<()> {
    write!(
        out,
        "{} {:>nw$} ",
        mode_string(entry.mode),
        entry.nlink,
        nw = widths.nlink
    )?;
    match &entry.owner {
        Some(name) => write!(out, "{:<ow$} ", name, ow = widths.owner)?,
        None => write!(out, "{:<ow$} ", entry.uid, ow = widths.owner)?,
    }
    match &entry.group {
        Some(name) => write!(out, "{:<gw$} ", name, gw = widths.group)?,
        None => write!(out, "{:<gw$} ", entry.gid, gw = widths.group)?,
    }
    write!(
        out,
        "{:>sw$} {} {}",
        entry.size,
        format_time(entry.mtime, now, config.test_mode),
        entry.name,
        sw = widths.size
    )?;
    match &entry.link_target {
        Some(LinkTarget::Resolved(target)) => write!(out, " -> {target}")?,
        Some(LinkTarget::Unreadable) => write!(out, " -> (error)")?,
        None => {}
    }
    writeln!(out)
}

/// The 10-character permission string: type, then r/w/x for owner, group,
/// and other.
pub fn mode_string(mode: u32) -> String {
    let kind = match mode & (libc::S_IFMT as u32) {
        m if m == libc::S_IFDIR as u32 => 'd',
        m if m == libc::S_IFLNK as u32 => 'l',
        m if m == libc::S_IFCHR as u32 => 'c',
        m if m == libc::S_IFBLK as u32 => 'b',
        m if m == libc::S_IFIFO as u32 => 'p',
        m if m == libc::S_IFSOCK as u32 => 's',
        _ => '-',
    };

    let bits = [
        (libc::S_IRUSR as u32, 'r'),
        (libc::S_IWUSR as u32, 'w'),
        (libc::S_IXUSR as u32, 'x'),
        (libc::S_IRGRP as u32, 'r'),
        (libc::S_IWGRP as u32, 'w'),
        (libc::S_IXGRP as u32, 'x'),
        (libc::S_IROTH as u32, 'r'),
        (libc::S_IWOTH as u32, 'w'),
        (libc::S_IXOTH as u32, 'x'),
    ];

    let mut s = String::with_capacity(10);
    s.push(kind);
    for (bit, ch) in bits {
        s.push(if mode & bit != 0 { ch } else { '-' });
    }
    s
}

/// `Mon DD HH:MM` for mtimes in the current year, `Mon DD  YYYY` otherwise.
/// Test mode substitutes a fixed literal so runs compare byte-for-byte.
fn format_time(mtime: i64, now: &DateTime<Local>, test_mode: bool) -> String {
    if test_mode {
        return TEST_TIMESTAMP.to_string();
    }
    let Some(when) = Local.timestamp_opt(mtime, 0).single() else {
        return mtime.to_string();
    };
    if when.year() == now.year() {
        when.format("%b %e %H:%M").to_string()
    } else {
        when.format("%b %e  %Y").to_string()
    }
}
