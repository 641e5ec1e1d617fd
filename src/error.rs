/// Generic message shown when the backend rejects a request without
/// providing a `mensaje` of its own.
pub const MENSAJE_GENERICO: &str = "Ocurrió un error. Intentá de nuevo.";

/// All errors that can occur while talking to the reservation backend or
/// validating user input locally.
#[derive(thiserror::Error, Debug)]
pub enum CanchaError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The backend rejected the request with a non-success status. The
    /// `mensaje` is the server's human-readable message verbatim, or
    /// [`MENSAJE_GENERICO`] when the body carried none. Transport failures
    /// and application rejections reach the user through the same message
    /// path; nothing retries.
    #[error("{mensaje}")]
    Rechazo {
        status: reqwest::StatusCode,
        mensaje: String,
    },

    /// Failed to read or decode the response body of a successful request.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// Response body was not the JSON shape the endpoint promises.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// Password and confirmation do not match. Reported locally, before
    /// any request is sent.
    #[error("las contraseñas no coinciden")]
    PasswordMismatch,

    /// Confirm was attempted without a court type, date and free slot all
    /// selected. Reported locally, before any request is sent.
    #[error("elegí una cancha, un día y un horario disponible")]
    SinSeleccion,

    /// Failed to parse a date or time string.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),
}

impl CanchaError {
    /// The text a UI should show for this error: the backend's `mensaje`
    /// verbatim when one exists, the generic fallback for transport
    /// failures, and the local message otherwise.
    pub fn mensaje(&self) -> String {
        match self {
            CanchaError::Rechazo { mensaje, .. } => mensaje.clone(),
            CanchaError::Http { .. }
            | CanchaError::ResponseBody { .. }
            | CanchaError::Decode { .. } => {
                MENSAJE_GENERICO.to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CanchaError>;
