//! Filesystem metadata access behind a narrow trait, so entry resolution can
//! be exercised against fakes.

use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use uzers::{Groups, Users, UsersCache};

/// Scalar results of one lstat-style query.
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    /// File type and permission bits.
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    /// Allocated blocks in 512-byte kernel units.
    pub blocks: u64,
    /// Modification time, Unix seconds.
    pub mtime: i64,
}

impl FileStat {
    pub fn is_dir(&self) -> bool {
        self.mode & (libc::S_IFMT as u32) == libc::S_IFDIR as u32
    }

    pub fn is_symlink(&self) -> bool {
        self.mode & (libc::S_IFMT as u32) == libc::S_IFLNK as u32
    }
}

/// The metadata operations a listing needs: lstat, readlink, readdir, and
/// uid/gid name lookup. Implementations must not follow symlinks.
pub trait MetadataSource {
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Read a symlink target, returning at most `max_len` bytes of it.
    fn read_link(&self, path: &Path, max_len: usize) -> io::Result<String>;

    /// Open a directory for iteration. The outer error is an open failure;
    /// per-item errors are mid-stream read failures. Items are bare names.
    fn open_dir(&self, path: &Path)
        -> io::Result<Box<dyn Iterator<Item = io::Result<String>> + '_>>;

    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
}

/// Live implementation backed by std::fs and a process-wide uid/gid cache.
pub struct SystemMetadata {
    users: UsersCache,
}

impl SystemMetadata {
    pub fn new() -> Self {
        SystemMetadata {
            users: UsersCache::new(),
        }
    }
}

impl Default for SystemMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for SystemMetadata {
    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let md = fs::symlink_metadata(path)?;
        Ok(FileStat {
            mode: md.mode(),
            nlink: md.nlink(),
            uid: md.uid(),
            gid: md.gid(),
            size: md.size(),
            blocks: md.blocks(),
            mtime: md.mtime(),
        })
    }

    fn read_link(&self, path: &Path, max_len: usize) -> io::Result<String> {
        let target = fs::read_link(path)?;
        let mut text = target.to_string_lossy().into_owned();
        if text.len() > max_len {
            let mut end = max_len;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        Ok(text)
    }

    fn open_dir(
        &self,
        path: &Path,
    ) -> io::Result<Box<dyn Iterator<Item = io::Result<String>> + '_>> {
        let dir = fs::read_dir(path)?;
        Ok(Box::new(dir.map(|item| {
            item.map(|e| e.file_name().to_string_lossy().into_owned())
        })))
    }

    fn user_name(&self, uid: u32) -> Option<String> {
        self.users
            .get_user_by_uid(uid)
            .map(|u| u.name().to_string_lossy().into_owned())
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.users
            .get_group_by_gid(gid)
            .map(|g| g.name().to_string_lossy().into_owned())
    }
}
