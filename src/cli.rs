use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Environment variable that switches on deterministic test output.
pub const TEST_MODE_VAR: &str = "LSL_TESTRUN";
/// Environment variable that switches the block total to 512-byte units.
pub const POSIX_BLOCKS_VAR: &str = "POSIXLY_CORRECT";

// -h and -V stay free: ls treats every short option except -l as invalid,
// so help and version are reachable through their long forms only.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lsl",
    version,
    about = "Lists information about the FILEs (the current directory by default)",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Use a long listing format (required)
    #[arg(short = 'l', overrides_with = "long")]
    pub long: bool,

    /// Files and directories to list
    #[arg(value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,
}

/// Runtime switches sourced from the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListConfig {
    /// Substitute fixed owner/group/time values for reproducible output.
    pub test_mode: bool,
    /// Report the block total in 512-byte units instead of 1024-byte units.
    pub posix_blocks: bool,
}

impl ListConfig {
    pub fn from_env() -> Self {
        ListConfig {
            test_mode: std::env::var_os(TEST_MODE_VAR).is_some(),
            posix_blocks: std::env::var_os(POSIX_BLOCKS_VAR).is_some(),
        }
    }
}
