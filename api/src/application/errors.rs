/// Failures of operations that act inside a viewer's ownership scope.
///
/// `Unauthorized` and `NotOwned` are client-facing and surface as field
/// errors; `Repository` wraps storage faults.
#[derive(thiserror::Error, Debug)]
pub enum ScopedError {
    #[error("This viewer doesn't exist")]
    Unauthorized,
    #[error("This note doesn't belong to the viewer")]
    NotOwned,
    #[error("storage operation failed")]
    Repository(#[source] anyhow::Error),
}
