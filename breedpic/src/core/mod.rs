//! Pure pipeline logic: no I/O, fully testable in isolation.

pub mod extract;
pub mod url;
