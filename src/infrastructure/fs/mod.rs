//! File System Infrastructure

mod local;
mod locator;

pub use local::{copy_dir, copy_file, walk_tree, write_atomic, TreeListing};
pub use locator::FsSourceLocator;
