use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

/// The binary under test, pinned to deterministic test-mode output and the
/// default block-size policy regardless of the caller's environment.
pub fn lsl() -> Command {
    let mut cmd = Command::cargo_bin("lsl").unwrap();
    cmd.env("LSL_TESTRUN", "1").env_remove("POSIXLY_CORRECT");
    cmd
}

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Write `len` bytes to `dir/name` and pin its permission bits, so rows
/// compare byte-for-byte across hosts.
pub fn write_file(dir: &Path, name: &str, len: usize, mode: u32) {
    let path = dir.join(name);
    fs::write(&path, vec![b'x'; len]).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
}
