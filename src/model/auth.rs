use serde::Serialize;

/// Request body for account registration.
#[derive(Debug, Clone, Serialize)]
pub struct Registro {
    pub nombre: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Clone, Serialize)]
pub struct Credenciales {
    pub email: String,
    pub password: String,
}

/// Request body for a password reset.
#[derive(Debug, Clone, Serialize)]
pub struct NuevaPassword {
    pub email: String,
    pub password: String,
}
