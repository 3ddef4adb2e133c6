#[derive(Debug, thiserror::Error)]
pub enum SecureStorageError {
    #[error("Item with given key does not exist")]
    NotFound { key: String },

    #[error("not implemented on web")]
    NotImplemented,

    #[error("Item with given key is not valid base64")]
    Corrupted {
        key: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl SecureStorageError {
    /// Returns true when the error means "no such item".
    pub fn is_not_found(&self) -> bool {
        matches!(self, SecureStorageError::NotFound { .. })
    }
}

pub type Result<T, E = SecureStorageError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_plugin_rejections() {
        let e = SecureStorageError::NotFound { key: "token".into() };
        assert_eq!(e.to_string(), "Item with given key does not exist");
        assert!(e.is_not_found());

        let e = SecureStorageError::NotImplemented;
        assert_eq!(e.to_string(), "not implemented on web");
        assert!(!e.is_not_found());
    }

    #[test]
    fn backend_errors_are_transparent() {
        let e: SecureStorageError = anyhow::anyhow!("quota exceeded").into();
        assert_eq!(e.to_string(), "quota exceeded");
    }
}
