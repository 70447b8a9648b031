//! Error handling for the Expirapp client
//!
//! One error enum for the whole crate, with the user-facing Spanish text
//! kept next to each variant the way the UI presented it.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Checkout validation errors (terminal, never retried)
    #[error("cart is empty")]
    EmptyCart,

    #[error("no client identity in session")]
    MissingIdentity,

    #[error("no auth token in session")]
    MissingToken,

    #[error("cart error: {0}")]
    Cart(#[from] shared::models::cart::CartError),

    #[error("order build error: {0}")]
    OrderBuild(#[from] shared::models::order::OrderBuildError),

    #[error("validation error: {0}")]
    Validation(String),

    // Remote errors
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // Local errors
    #[error("session storage error: {0}")]
    Session(String),

    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Server-side failures (5xx) and transport failures are worth another
    /// attempt; everything else is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Api { status, .. } => *status >= 500,
            AppError::Transport(_) => true,
            _ => false,
        }
    }

    /// Text shown to the user, in the UI's language.
    pub fn user_message(&self) -> String {
        match self {
            AppError::EmptyCart => {
                "El carrito está vacío. Por favor, añade productos.".to_string()
            }
            AppError::MissingIdentity => {
                "No se encontró la sesión del cliente. Inicia sesión de nuevo.".to_string()
            }
            AppError::MissingToken => {
                "Tu sesión ha expirado. Inicia sesión de nuevo.".to_string()
            }
            AppError::Cart(err) => err.to_string(),
            AppError::OrderBuild(err) => err.to_string(),
            AppError::Validation(message) => message.clone(),
            AppError::Api { status, message } => format!("Error {status}: {message}"),
            AppError::Transport(_) => "Error de red o servidor.".to_string(),
            AppError::Session(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                "Error desconocido al intentar completar la operación.".to_string()
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for the client
pub type AppResult<T> = Result<T, AppError>;
