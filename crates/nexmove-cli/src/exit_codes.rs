//! Standard exit codes for CLI operations
//!
//! Each relocation step has its own code so wrapper scripts can tell which
//! step to retry.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Configuration error - missing or invalid parameters, settings or tool versions
pub const CONFIG_ERROR: i32 = 2;

/// Fetch step failed
pub const FETCH_ERROR: i32 = 3;

/// Publish step failed
pub const PUBLISH_ERROR: i32 = 4;

/// Delete step failed, including missing credentials
pub const DELETE_ERROR: i32 = 5;

/// Interrupted by the user (128 + SIGINT)
pub const CANCELLED: i32 = 130;
