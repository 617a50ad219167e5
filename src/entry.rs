//! Listing entries and the name-sorted collection that holds them.

use std::cmp::Ordering;

/// Resolved symlink target text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Target path as read from the link.
    Resolved(String),
    /// The link exists but its target could not be read.
    Unreadable,
}

/// What an entry is, and for top-level directories, what it contains.
#[derive(Debug, Clone)]
pub enum EntryKind {
    File,
    /// Directory; children are populated only for top-level arguments
    /// (listing is not recursive), so a directory child carries an empty
    /// collection.
    Directory(SortedEntries),
}

/// A single entry in the listing.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Display name: the argument text as given for top-level entries, the
    /// basename for directory children.
    pub name: String,
    /// File type and permission bits, POSIX `st_mode` layout.
    pub mode: u32,
    /// Hard link count.
    pub nlink: u64,
    /// Owner and group ids.
    pub uid: u32,
    pub gid: u32,
    /// Resolved owner/group names; `None` falls back to the numeric id.
    pub owner: Option<String>,
    pub group: Option<String>,
    /// Size in bytes, exactly as reported by stat.
    pub size: u64,
    /// Block count in 512-byte kernel units. For a top-level directory this
    /// is the sum of its visible children's counts, not the inode's own.
    pub blocks: u64,
    /// Modification time, Unix seconds.
    pub mtime: i64,
    /// `Some` iff the entry is a symlink.
    pub link_target: Option<LinkTarget>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory(_))
    }

    /// Children of a directory entry, `None` for files.
    pub fn children(&self) -> Option<&SortedEntries> {
        match &self.kind {
            EntryKind::Directory(children) => Some(children),
            EntryKind::File => None,
        }
    }
}

/// strcasecmp-style ordering: byte-wise comparison with ASCII case folded,
/// independent of locale.
pub fn name_cmp(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|b| b.to_ascii_lowercase());
    let b = b.bytes().map(|b| b.to_ascii_lowercase());
    a.cmp(b)
}

/// Entries kept sorted by case-insensitive name; equal names preserve
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct SortedEntries {
    items: Vec<Entry>,
}

impl SortedEntries {
    pub fn new() -> Self {
        SortedEntries::default()
    }

    /// Insert at the sorted position, scanning from the front. Listings are
    /// small, so the O(n) scan is fine.
    pub fn insert(&mut self, entry: Entry) {
        let pos = self
            .items
            .iter()
            .position(|e| name_cmp(&e.name, &entry.name) == Ordering::Greater)
            .unwrap_or(self.items.len());
        self.items.insert(pos, entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a SortedEntries {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
