use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::error::Result;
use crate::model::{Disponibilidad, NuevoTurno, Turno};
use crate::view::{BookingView, Consulta};

/// The backend operations the booking lifecycle depends on. Implemented by
/// [`CanchaClient`](crate::CanchaClient); tests drive the lifecycle with an
/// in-memory fake.
#[allow(async_fn_in_trait)]
pub trait TurnosApi {
    /// Occupied/owned timestamps for one (court type, date).
    async fn disponibles(&self, consulta: Consulta) -> Result<Disponibilidad>;
    /// The current user's reservations.
    async fn mis_turnos(&self) -> Result<Vec<Turno>>;
    /// Create a reservation.
    async fn reservar(&self, turno: &NuevoTurno) -> Result<Turno>;
    /// Cancel a reservation by id.
    async fn cancelar(&self, id: u64) -> Result<()>;
}

/// Drives the booking page: owns the [`BookingView`], the user's
/// reservation list, and the submit/cancel flows against a [`TurnosApi`].
///
/// Every mutating flow takes `&mut self` and awaits its request to
/// completion, so at most one submission per user action can be
/// outstanding; the confirm control stays disabled for the duration.
#[derive(Debug)]
pub struct BookingController<A> {
    api: A,
    vista: BookingView,
    turnos: Vec<Turno>,
    cancelacion: Option<u64>,
}

impl<A: TurnosApi> BookingController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            vista: BookingView::new(),
            turnos: Vec::new(),
            cancelacion: None,
        }
    }

    pub fn vista(&self) -> &BookingView {
        &self.vista
    }

    /// The reservation list as of the last sync.
    pub fn turnos(&self) -> &[Turno] {
        &self.turnos
    }

    /// Initial page load: the reservation list, plus availability if a
    /// court type is already chosen.
    pub async fn cargar(&mut self, now: NaiveDateTime) -> Result<()> {
        self.turnos = self.api.mis_turnos().await?;
        if let Some(consulta) = self.vista.consulta_actual(now.date()) {
            self.buscar_disponibilidad(consulta, now).await?;
        }
        Ok(())
    }

    /// Select a court type and fetch availability for it.
    pub async fn elegir_cancha(&mut self, cancha_tipo: u8, now: NaiveDateTime) -> Result<()> {
        let consulta = self.vista.elegir_cancha(cancha_tipo, now.date());
        self.buscar_disponibilidad(consulta, now).await
    }

    /// Activate a day from the strip; fetches availability once a court
    /// type has been chosen too.
    pub async fn elegir_fecha(&mut self, fecha: NaiveDate, now: NaiveDateTime) -> Result<()> {
        match self.vista.elegir_fecha(fecha) {
            Some(consulta) => self.buscar_disponibilidad(consulta, now).await,
            None => Ok(()),
        }
    }

    /// Select a slot by its `HH:MM` label; only free slots take.
    pub fn elegir_hora(&mut self, hora: &str, now: NaiveDateTime) -> bool {
        self.vista.elegir_hora(hora, now)
    }

    pub fn confirmar_habilitado(&self, now: NaiveDateTime) -> bool {
        self.vista.confirmar_habilitado(now)
    }

    /// Confirm the pending selection. On success the selection is cleared
    /// and both the reservation list and the availability grid re-sync; on
    /// failure the selection is retained and the error carries the
    /// backend's `mensaje`.
    pub async fn confirmar(&mut self, now: NaiveDateTime) -> Result<Turno> {
        let nuevo = self.vista.nuevo_turno(now)?;
        let turno = self.api.reservar(&nuevo).await?;
        self.vista.limpiar_seleccion();
        self.refrescar(now).await;
        Ok(turno)
    }

    /// Open the cancellation dialog for one reservation. No request is
    /// sent until the dialog is confirmed.
    pub fn pedir_cancelacion(&mut self, id: u64) {
        self.cancelacion = Some(id);
    }

    /// The reservation id awaiting dialog confirmation, if any.
    pub fn cancelacion_pendiente(&self) -> Option<u64> {
        self.cancelacion
    }

    /// Dismiss the dialog; the cancellation is abandoned without a request.
    pub fn descartar_cancelacion(&mut self) {
        self.cancelacion = None;
    }

    /// Send the confirmed cancellation. Reservations and availability are
    /// re-fetched regardless of the outcome.
    pub async fn confirmar_cancelacion(&mut self, now: NaiveDateTime) -> Result<()> {
        let Some(id) = self.cancelacion.take() else {
            return Ok(());
        };
        let resultado = self.api.cancelar(id).await;
        self.refrescar(now).await;
        resultado
    }

    async fn buscar_disponibilidad(&mut self, consulta: Consulta, now: NaiveDateTime) -> Result<()> {
        let disp = self.api.disponibles(consulta).await?;
        self.vista.aplicar_disponibilidad(consulta, &disp, now);
        Ok(())
    }

    /// Post-action re-sync. Failures here are logged and swallowed: the
    /// user action itself already resolved, and the next interaction
    /// re-fetches anyway.
    async fn refrescar(&mut self, now: NaiveDateTime) {
        match self.api.mis_turnos().await {
            Ok(turnos) => self.turnos = turnos,
            Err(e) => warn!("no se pudo refrescar la lista de turnos: {e}"),
        }
        if let Some(consulta) = self.vista.consulta_actual(now.date()) {
            if let Err(e) = self.buscar_disponibilidad(consulta, now).await {
                warn!("no se pudo refrescar la disponibilidad: {e}");
            }
        }
    }
}
