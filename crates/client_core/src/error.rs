use shared::error::ProtocolError;
use thiserror::Error;

/// Message shown for every failure that carries no server text.
pub const NETWORK_ERROR_MESSAGE: &str = "网络错误";

#[derive(Debug, Error)]
pub enum ApiCallError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(#[from] ProtocolError),
    #[error("server rejected request: {0}")]
    Rejected(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl ApiCallError {
    /// Text for the error notification. Only a server rejection passes its
    /// own message through.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) if !message.trim().is_empty() => message.clone(),
            _ => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rejections_surface_server_text() {
        assert_eq!(
            ApiCallError::Rejected("学院不存在".to_string()).user_message(),
            "学院不存在"
        );
        assert_eq!(
            ApiCallError::Rejected("  ".to_string()).user_message(),
            NETWORK_ERROR_MESSAGE
        );
        assert_eq!(
            ApiCallError::Decode(ProtocolError::UnknownStatus(9)).user_message(),
            NETWORK_ERROR_MESSAGE
        );
        assert_eq!(
            ApiCallError::Unavailable("queue full".to_string()).user_message(),
            NETWORK_ERROR_MESSAGE
        );
    }
}
