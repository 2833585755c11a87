//! Collection sources for the supported backing stores

pub mod filesystem;
pub mod json_file;

pub use filesystem::{DirectorySource, directories_first, is_directory};
pub use json_file::JsonFileSource;
