/// Core error type for the esa-mcp system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required configuration was missing or empty at client construction.
    #[error("{0}")]
    Config(&'static str),

    /// The esa.io API answered with a non-2xx status.
    #[error("{method} {url} failed with status {status}")]
    Status {
        status: u16,
        method: String,
        url: String,
    },

    /// The request never produced a usable response (connection, TLS,
    /// body decoding). The underlying error is flattened to its message.
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// True when the remote service reported 404 for the requested resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display_names_request() {
        let err = Error::Status {
            status: 404,
            method: "GET".to_string(),
            url: "https://api.esa.io/v1/teams/acme/posts/7".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GET"));
        assert!(msg.contains("/posts/7"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn not_found_only_for_404() {
        let not_found = Error::Status {
            status: 404,
            method: "GET".to_string(),
            url: "u".to_string(),
        };
        let server_err = Error::Status {
            status: 500,
            method: "GET".to_string(),
            url: "u".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(!server_err.is_not_found());
        assert!(!Error::Config("ESA_TOKEN is required").is_not_found());
    }

    #[test]
    fn config_error_display_is_bare_message() {
        assert_eq!(
            Error::Config("ESA_TEAM_NAME is required").to_string(),
            "ESA_TEAM_NAME is required"
        );
    }
}
