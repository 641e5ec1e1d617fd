use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::booking::TurnosApi;
use crate::error::{CanchaError, Result, MENSAJE_GENERICO};
use crate::model::{Credenciales, Disponibilidad, Mensaje, NuevaPassword, NuevoTurno, Registro, Turno};
use crate::view::Consulta;

/// HTTP client for the reservation backend.
///
/// `CanchaClient` wraps a [`reqwest::Client`] with the session cookie jar
/// enabled and exposes every backend endpoint as a typed async method. It
/// implements [`TurnosApi`], so it plugs straight into a
/// [`BookingController`](crate::BookingController).
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> cancha_client::Result<()> {
/// use cancha_client::CanchaClient;
///
/// let client = CanchaClient::new("http://127.0.0.1:5000");
/// client.iniciar_sesion("ana@example.com", "secreto").await?;
/// let turnos = client.mis_turnos().await?;
/// println!("Tenés {} turnos", turnos.len());
/// # Ok(())
/// # }
/// ```
pub struct CanchaClient {
    http: reqwest::Client,
    base_url: String,
}

impl CanchaClient {
    /// Create a client for the given base URL. The session is cookie
    /// based, so the cookie store is enabled.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("reqwest client");
        Self::with_client(http, base_url)
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers,
    /// etc. Remember to keep the cookie store enabled or the session will
    /// not survive past login.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Occupied/owned timestamps for one (court type, date).
    #[instrument(skip(self))]
    pub async fn disponibles(&self, cancha_tipo: u8, fecha: NaiveDate) -> Result<Disponibilidad> {
        let url = self.url("/turnos/disponibles");
        let request = self.http.get(&url).query(&[
            ("cancha_tipo", cancha_tipo.to_string()),
            ("fecha", fecha.format("%Y-%m-%d").to_string()),
        ]);
        let (status, body) = enviar(request, &url).await?;
        decodificar(&url, status, &body)
    }

    /// The current user's reservations.
    #[instrument(skip(self))]
    pub async fn mis_turnos(&self) -> Result<Vec<Turno>> {
        let url = self.url("/turnos/mios");
        let (status, body) = enviar(self.http.get(&url), &url).await?;
        decodificar(&url, status, &body)
    }

    /// Create a reservation; returns the created record.
    #[instrument(skip(self))]
    pub async fn reservar(&self, turno: &NuevoTurno) -> Result<Turno> {
        let url = self.url("/turnos");
        let (status, body) = enviar(self.http.post(&url).json(turno), &url).await?;
        decodificar(&url, status, &body)
    }

    /// Cancel a reservation by id.
    #[instrument(skip(self))]
    pub async fn cancelar(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("/turnos/{id}"));
        let (status, body) = enviar(self.http.delete(&url), &url).await?;
        chequear(&url, status, &body)
    }

    /// Create an account. The password confirmation is validated locally;
    /// on mismatch no request is sent.
    #[instrument(skip(self, password, confirmacion))]
    pub async fn registrar(
        &self,
        nombre: &str,
        email: &str,
        password: &str,
        confirmacion: &str,
    ) -> Result<()> {
        if password != confirmacion {
            return Err(CanchaError::PasswordMismatch);
        }
        let url = self.url("/register");
        let cuerpo = Registro {
            nombre: nombre.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let (status, body) = enviar(self.http.post(&url).json(&cuerpo), &url).await?;
        chequear(&url, status, &body)
    }

    /// Start a session. On success the backend redirects to `/me` and the
    /// session cookie lands in the jar; the caller decides what
    /// "navigation" means.
    #[instrument(skip(self, password))]
    pub async fn iniciar_sesion(&self, email: &str, password: &str) -> Result<()> {
        let url = self.url("/login");
        let cuerpo = Credenciales {
            email: email.to_string(),
            password: password.to_string(),
        };
        let (status, body) = enviar(self.http.post(&url).json(&cuerpo), &url).await?;
        chequear(&url, status, &body)
    }

    /// End the session.
    #[instrument(skip(self))]
    pub async fn cerrar_sesion(&self) -> Result<()> {
        let url = self.url("/logout");
        let (status, body) = enviar(self.http.post(&url), &url).await?;
        chequear(&url, status, &body)
    }

    /// Reset the account password. The confirmation is validated locally;
    /// on mismatch no request is sent.
    #[instrument(skip(self, password, confirmacion))]
    pub async fn olvide_password(
        &self,
        email: &str,
        password: &str,
        confirmacion: &str,
    ) -> Result<()> {
        if password != confirmacion {
            return Err(CanchaError::PasswordMismatch);
        }
        let url = self.url("/forgot-password");
        let cuerpo = NuevaPassword {
            email: email.to_string(),
            password: password.to_string(),
        };
        let (status, body) = enviar(self.http.post(&url).json(&cuerpo), &url).await?;
        chequear(&url, status, &body)
    }
}

impl TurnosApi for CanchaClient {
    async fn disponibles(&self, consulta: Consulta) -> Result<Disponibilidad> {
        CanchaClient::disponibles(self, consulta.cancha_tipo, consulta.fecha).await
    }

    async fn mis_turnos(&self) -> Result<Vec<Turno>> {
        CanchaClient::mis_turnos(self).await
    }

    async fn reservar(&self, turno: &NuevoTurno) -> Result<Turno> {
        CanchaClient::reservar(self, turno).await
    }

    async fn cancelar(&self, id: u64) -> Result<()> {
        CanchaClient::cancelar(self, id).await
    }
}

/// Send a request and read the response body as text.
async fn enviar(request: reqwest::RequestBuilder, url: &str) -> Result<(StatusCode, String)> {
    debug!(url, "request");

    let response = request.send().await.map_err(|e| CanchaError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| CanchaError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok((status, body))
}

/// Turn a non-success response into [`CanchaError::Rechazo`], carrying the
/// backend's `mensaje` verbatim or the generic fallback when absent.
fn chequear(url: &str, status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    debug!(url, %status, "rechazo");
    let mensaje = serde_json::from_str::<Mensaje>(body)
        .map(|m| m.mensaje)
        .unwrap_or_else(|_| MENSAJE_GENERICO.to_string());
    Err(CanchaError::Rechazo { status, mensaje })
}

/// [`chequear`], then decode the success body.
fn decodificar<T: DeserializeOwned>(url: &str, status: StatusCode, body: &str) -> Result<T> {
    chequear(url, status, body)?;
    serde_json::from_str(body).map_err(|e| CanchaError::Decode {
        url: url.to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodifica_disponibilidad() {
        let body = r#"{"ocupados": ["2024-06-01 10:00"], "mios": ["2024-06-01 11:00"]}"#;
        let disp: Disponibilidad = decodificar("/turnos/disponibles", StatusCode::OK, body).unwrap();
        assert_eq!(disp.ocupados, vec!["2024-06-01 10:00"]);
        assert_eq!(disp.mios, vec!["2024-06-01 11:00"]);
    }

    #[test]
    fn decodifica_turnos() {
        let body = r#"[{"id": 42, "nombre_reserva": "Ana", "cancha_tipo": 2, "horario": "2024-06-01 10:00"}]"#;
        let turnos: Vec<Turno> = decodificar("/turnos/mios", StatusCode::OK, body).unwrap();
        assert_eq!(turnos[0].id, 42);
        assert_eq!(turnos[0].nombre_reserva, "Ana");
    }

    #[test]
    fn rechazo_usa_el_mensaje_del_backend() {
        let err = chequear(
            "/turnos",
            StatusCode::CONFLICT,
            r#"{"mensaje": "El turno ya está reservado"}"#,
        )
        .unwrap_err();
        assert_eq!(err.mensaje(), "El turno ya está reservado");
    }

    #[test]
    fn rechazo_sin_mensaje_cae_al_generico() {
        let err = chequear("/turnos", StatusCode::INTERNAL_SERVER_ERROR, "").unwrap_err();
        assert_eq!(err.mensaje(), MENSAJE_GENERICO);

        let err = chequear("/turnos", StatusCode::BAD_GATEWAY, "<html>502</html>").unwrap_err();
        assert_eq!(err.mensaje(), MENSAJE_GENERICO);
    }

    #[test]
    fn cuerpo_inesperado_es_error_de_decodificacion() {
        let err = decodificar::<Disponibilidad>("/turnos/disponibles", StatusCode::OK, "[]")
            .unwrap_err();
        assert!(matches!(err, CanchaError::Decode { .. }));
    }

    #[test]
    fn arma_urls_sin_doble_barra() {
        let client = CanchaClient::new("http://127.0.0.1:5000/");
        assert_eq!(client.url("/turnos/mios"), "http://127.0.0.1:5000/turnos/mios");
    }

    #[tokio::test]
    async fn passwords_distintas_fallan_sin_red() {
        // The base URL is unroutable: a mismatch must fail before any
        // request is attempted.
        let client = CanchaClient::new("http://127.0.0.1:1");
        let err = client
            .registrar("Ana", "ana@example.com", "uno", "dos")
            .await
            .unwrap_err();
        assert!(matches!(err, CanchaError::PasswordMismatch));

        let err = client
            .olvide_password("ana@example.com", "uno", "dos")
            .await
            .unwrap_err();
        assert!(matches!(err, CanchaError::PasswordMismatch));
    }
}
