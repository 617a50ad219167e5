//! Running maxima of the printed column widths.
//!
//! Column widths depend on the whole result set, so entries are observed as
//! they are resolved and the report is rendered only afterwards. The same
//! width functions are used during accumulation and rendering; columns can
//! therefore never come out too narrow.

use crate::entry::Entry;

/// Maximum printed width seen so far for each aligned column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub nlink: usize,
    pub size: usize,
    pub owner: usize,
    pub group: usize,
}

impl ColumnWidths {
    /// Account for one entry that will get a rendered metadata row.
    pub fn observe(&mut self, entry: &Entry) {
        self.nlink = self.nlink.max(count_digits(entry.nlink));
        self.size = self.size.max(count_digits(entry.size));
        self.owner = self
            .owner
            .max(id_column_width(entry.owner.as_deref(), entry.uid));
        self.group = self
            .group
            .max(id_column_width(entry.group.as_deref(), entry.gid));
    }
}

/// Decimal digit count; zero still takes one column.
pub fn count_digits(mut v: u64) -> usize {
    if v < 10 {
        return 1;
    }
    let mut n = 0;
    while v != 0 {
        v /= 10;
        n += 1;
    }
    n
}

/// Printed width of an owner or group cell: the name when one resolved,
/// otherwise the numeric id.
pub fn id_column_width(name: Option<&str>, id: u32) -> usize {
    match name {
        Some(name) => name.len(),
        None => count_digits(u64::from(id)),
    }
}
