use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum TokenDecodeError {
    #[error("token could not be verified")]
    Invalid(#[source] anyhow::Error),
    #[error("token carries no usable viewer id")]
    BadClaim,
}

pub trait TokenCodec: Send + Sync {
    fn issue(&self, viewer_id: Uuid) -> anyhow::Result<String>;
    /// Verifies signature and expiry, returning the `viewer_id` claim.
    fn decode(&self, token: &str) -> Result<Uuid, TokenDecodeError>;
}
