//! Compare use case: the delta between two retrieved trees

mod options;
mod use_case;

pub use options::CompareOptions;
pub use use_case::{write_package, CompareUseCase};
