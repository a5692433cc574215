use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Unknown message type: {0}")]
    UnknownKind(String),

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Invalid payload for {kind}: {reason}")]
    InvalidPayload { kind: String, reason: String },

    #[error("Financial computation error: {0}")]
    Finance(#[from] boardroom_finance::FinanceError),

    #[error("Agent mailbox closed: {0}")]
    MailboxClosed(String),

    #[error("Agent dropped the reply before answering")]
    ReplyDropped,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Payload errors carry the request kind so the caller can tell which
    /// handler rejected the data.
    pub fn invalid_payload(kind: &str, err: serde_json::Error) -> Self {
        Self::InvalidPayload {
            kind: kind.to_string(),
            reason: err.to_string(),
        }
    }
}
