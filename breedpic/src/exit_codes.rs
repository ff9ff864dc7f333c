//! Stable exit codes for the `breedpic` binary.

/// Image URL fetched and saved.
pub const OK: i32 = 0;
/// Invalid configuration or command line.
pub const INVALID: i32 = 1;
/// Standard input could not be read (closed before a line arrived).
pub const INPUT: i32 = 2;
/// Transport failure: DNS, connection refused, TLS, invalid URL.
pub const NETWORK: i32 = 3;
/// Remote API answered with a non-200 status.
pub const REMOTE_FAILURE: i32 = 4;
/// Response body was not valid JSON.
pub const PARSE: i32 = 5;
/// Response JSON had no `message` string.
pub const MISSING_FIELD: i32 = 6;
/// Output file could not be written.
pub const WRITE: i32 = 7;
