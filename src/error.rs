use thiserror::Error;

/// Raised once at startup when the gateway cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("API key not found. Please set the OPENAI_API_KEY in the .env file.")]
    MissingApiKey,

    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Any failure of a single inference call.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Refusing to call the model with an empty message list")]
    EmptyRequest,

    #[error("Request to model endpoint failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response from model endpoint: {0}")]
    Malformed(String),

    #[error("No response from model endpoint")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Nothing submitted")]
    NothingSubmitted,

    #[error("Unsupported image format '{0}', expected jpg, jpeg or png")]
    UnsupportedFormat(String),

    #[error("Image file is empty")]
    EmptyImage,

    #[error("File content is not a JPEG or PNG image")]
    UnrecognizedImage,

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
}

/// Terminal for the current interaction only; the session stays usable.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Input(#[from] InputError),
}
