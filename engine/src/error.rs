use thiserror::Error;

/// The only failures that cross from the generation client into the rest of the app.
///
/// Both variants display as their bare message, so whatever is shown to the user is
/// exactly what the service (or the configuration check) said.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Generation(String),
}

impl GenerationError {
    pub fn message(&self) -> &str {
        match self {
            Self::Configuration(m) | Self::Generation(m) => m,
        }
    }

    pub fn missing_credential() -> Self {
        Self::Configuration(
            "API Key is missing. Please check your environment configuration.".into(),
        )
    }
}
