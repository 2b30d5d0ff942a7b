use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::error::FetchError;
use crate::source::ModelSource;

/// Reads a model document from a file, or from stdin when the path is `-`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

#[async_trait]
impl ModelSource for FileSource {
    fn kind(&self) -> &'static str {
        if self.is_stdin() { "stdin" } else { "file" }
    }

    fn describe(&self) -> String {
        if self.is_stdin() {
            "<stdin>".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        let io_error = |source| FetchError::Io {
            path: self.describe(),
            source,
        };

        if self.is_stdin() {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .map_err(io_error)?;
            return Ok(buffer);
        }

        tokio::fs::read_to_string(&self.path).await.map_err(io_error)
    }
}
