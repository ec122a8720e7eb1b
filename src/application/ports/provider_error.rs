#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}
