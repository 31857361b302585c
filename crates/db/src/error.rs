use demiurge_core::error::{CoreError, GraphError};

/// Error type returned by every repository method.
///
/// Graph rejections and generic domain errors pass through transparently
/// so the API layer maps them; anything else is a database failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
