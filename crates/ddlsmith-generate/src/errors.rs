use thiserror::Error;

/// Errors emitted by the DDL generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The input could not be parsed into a model; nothing is emitted.
    #[error(transparent)]
    Model(#[from] ddlsmith_core::Error),
}
