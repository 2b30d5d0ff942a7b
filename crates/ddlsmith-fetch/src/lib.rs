//! Model sources for ddlsmith: local files, stdin and the Ellie.ai API.

pub mod ellie;
pub mod error;
pub mod file;
pub mod source;

pub use ellie::{DEFAULT_ENVIRONMENT, EllieApiSource};
pub use error::FetchError;
pub use file::FileSource;
pub use source::ModelSource;
