/// Failure kinds surfaced by the ingestion workflow.
///
/// The set is closed: every failure a request can hit is exactly one of these,
/// and the API layer maps each variant to a single HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Bad input. Raised before any remote call is made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Image `index` (1-based) of `total` failed to upload or came back
    /// without a URL. Earlier uploads in the same request are left in place.
    #[error("Upload failed for image {index} of {total}: {reason}")]
    Upload {
        index: usize,
        total: usize,
        reason: String,
    },

    /// The record insert failed or returned nothing.
    #[error("Persist failed: {0}")]
    Persist(String),

    /// The record store never came up at startup.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}
