use serde::Serialize;

/// Crate-wide error type. Every fallible function returns `Result<T, AgentError>`.
/// Serializes cleanly so a host app gets structured error messages.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider quota exceeded")]
    Quota,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("{0}")]
    Internal(String),
}

/// Host apps consume errors as `{ error: "...", kind: "..." }`.
impl Serialize for AgentError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("AgentError", 2)?;
        s.serialize_field("error", &self.to_string())?;
        s.serialize_field(
            "kind",
            match self {
                AgentError::Provider(_) => "provider",
                AgentError::Quota => "quota",
                AgentError::Http(_) => "http",
                AgentError::Serde(_) => "serde",
                AgentError::Io(_) => "io",
                AgentError::NotFound(_) => "not_found",
                AgentError::Config(_) => "config",
                AgentError::Speech(_) => "speech",
                AgentError::Internal(_) => "internal",
            },
        )?;
        s.end()
    }
}
