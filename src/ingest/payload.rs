use axum::body::Bytes;

/// The complete body of one accepted request, as handed to the publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedPayload {
    pub body: Bytes,
    /// `Content-Type` the caller sent, forwarded downstream unchanged.
    pub content_type: Option<String>,
    pub request_id: Option<String>,
}

impl IngestedPayload {
    pub fn new(body: Bytes) -> Self {
        Self {
            body,
            content_type: None,
            request_id: None,
        }
    }
}
