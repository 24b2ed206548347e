use thiserror::Error;

/// Everything that can go wrong between reading an order ID and showing
/// the rendered order. The presenter turns each variant into a message in
/// the output target; none of them escape past it.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("order id is empty")]
    EmptyInput,

    #[error("order request failed with status {status}")]
    Fetch { status: u16 },

    #[error("network error: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid order json: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("response contains no order")]
    MissingOrder,
}

impl ViewError {
    /// Status code carried by a non-2xx response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ViewError::Fetch { status } => Some(*status),
            _ => None,
        }
    }
}
