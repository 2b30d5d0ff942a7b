use async_trait::async_trait;

use crate::error::FetchError;

/// Trait implemented by anything that can produce model JSON text.
#[async_trait]
pub trait ModelSource {
    /// Returns the source identifier (e.g. `file`, `ellie`).
    fn kind(&self) -> &'static str;

    /// Human readable location for logs and error messages.
    fn describe(&self) -> String;

    /// Read the raw JSON document.
    async fn fetch(&self) -> Result<String, FetchError>;
}
