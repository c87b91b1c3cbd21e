//! Catalog refresh and caching adapters

mod cache;
mod sf_cli;

pub use cache::TomlCatalogRepository;
pub use sf_cli::{parse_metadata_types, SfCliCatalogSource};
