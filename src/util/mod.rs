
/// Helpers for opening plain or gzip-compressed delimited files
pub mod delimited_io;
/// Helper functions for writing JSON via serde
pub mod json_io;
