//! Document source strategies.
//!
//! Only the filesystem strategy exists. Build hooks that already hold the
//! markdown in memory call the per-document checks directly.

pub mod fs;
