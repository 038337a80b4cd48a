use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("resource not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub(crate) fn post_not_found(id: i64) -> Self {
        Self::NotFound(format!("post id: {id}"))
    }
}
