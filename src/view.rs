use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CanchaError, Result};
use crate::horario;
use crate::model::{Disponibilidad, NuevoTurno};

/// Prompt shown while no slot is selected.
pub const ELEGI_HORARIO: &str = "Elegí un horario";

/// Display state of one slot. States are mutually exclusive and recomputed
/// from scratch on every availability refresh. The display form doubles as
/// a CSS class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EstadoSlot {
    /// Free to book.
    Libre,
    /// Taken by someone else.
    Ocupado,
    /// Taken by the current user.
    Mio,
    /// Already elapsed on today's date, regardless of occupancy.
    Pasado,
}

/// One row of the rendered slot grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VistaSlot {
    /// Bare `HH:MM` label.
    pub hora: String,
    /// Full `YYYY-MM-DD HH:MM` timestamp.
    pub horario: String,
    pub estado: EstadoSlot,
}

/// Tag identifying the (court type, date) an availability fetch was issued
/// for. A response whose tag no longer matches the current selection is
/// discarded instead of overwriting a newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consulta {
    pub cancha_tipo: u8,
    pub fecha: NaiveDate,
}

/// Client-side view state for the booking page: selected court type, date
/// and slot, plus the last applied availability sets.
///
/// The view never reads the clock; `now` is always an argument, so every
/// classification rule is unit-testable.
#[derive(Debug, Clone, Default)]
pub struct BookingView {
    cancha_tipo: Option<u8>,
    fecha: Option<NaiveDate>,
    hora: Option<String>,
    ocupados: HashSet<String>,
    mios: HashSet<String>,
}

impl BookingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancha_tipo(&self) -> Option<u8> {
        self.cancha_tipo
    }

    pub fn fecha(&self) -> Option<NaiveDate> {
        self.fecha
    }

    /// The currently selected `HH:MM` slot, if any.
    pub fn seleccion(&self) -> Option<&str> {
        self.hora.as_deref()
    }

    /// The date the grid renders for: the selected one, or today.
    fn fecha_efectiva(&self, hoy: NaiveDate) -> NaiveDate {
        self.fecha.unwrap_or(hoy)
    }

    /// The fetch tag for the current selection, once a court type is set.
    pub fn consulta_actual(&self, hoy: NaiveDate) -> Option<Consulta> {
        self.cancha_tipo.map(|cancha_tipo| Consulta {
            cancha_tipo,
            fecha: self.fecha_efectiva(hoy),
        })
    }

    /// Select a court type. Clears the slot selection and returns the tag
    /// for the availability fetch this change requires.
    pub fn elegir_cancha(&mut self, cancha_tipo: u8, hoy: NaiveDate) -> Consulta {
        self.cancha_tipo = Some(cancha_tipo);
        self.hora = None;
        Consulta {
            cancha_tipo,
            fecha: self.fecha_efectiva(hoy),
        }
    }

    /// Activate a day from the strip. Clears the slot selection; returns a
    /// fetch tag once a court type is chosen too.
    pub fn elegir_fecha(&mut self, fecha: NaiveDate) -> Option<Consulta> {
        self.fecha = Some(fecha);
        self.hora = None;
        self.cancha_tipo.map(|cancha_tipo| Consulta { cancha_tipo, fecha })
    }

    /// Apply a fetched availability response. Returns `false` (leaving the
    /// grid untouched) when the tag no longer matches the current court
    /// and date, so a superseded in-flight response cannot overwrite a
    /// newer selection's state.
    pub fn aplicar_disponibilidad(
        &mut self,
        consulta: Consulta,
        disp: &Disponibilidad,
        now: NaiveDateTime,
    ) -> bool {
        let vigente = self.cancha_tipo == Some(consulta.cancha_tipo)
            && self.fecha_efectiva(now.date()) == consulta.fecha;
        if !vigente {
            return false;
        }

        self.ocupados = disp.ocupados.iter().cloned().collect();
        self.mios = disp.mios.iter().cloned().collect();

        // Occupancy override: a selection that is no longer free is dropped
        // and the selection label falls back to the prompt.
        if let Some(hora) = self.hora.clone() {
            if self.clasificar_hora(&hora, now) != Some(EstadoSlot::Libre) {
                self.hora = None;
            }
        }
        true
    }

    fn clasificar(&self, slot: NaiveTime, now: NaiveDateTime) -> EstadoSlot {
        let fecha = self.fecha_efectiva(now.date());
        let momento = fecha.and_time(slot);
        if fecha == now.date() && momento <= now {
            return EstadoSlot::Pasado;
        }
        let horario = horario::formatear(momento);
        if self.mios.contains(&horario) {
            EstadoSlot::Mio
        } else if self.ocupados.contains(&horario) {
            EstadoSlot::Ocupado
        } else {
            EstadoSlot::Libre
        }
    }

    fn clasificar_hora(&self, hora: &str, now: NaiveDateTime) -> Option<EstadoSlot> {
        NaiveTime::parse_from_str(hora, "%H:%M")
            .ok()
            .map(|t| self.clasificar(t, now))
    }

    /// Select a slot by its `HH:MM` label. Only a currently free slot can
    /// become the selection; returns whether the selection took.
    pub fn elegir_hora(&mut self, hora: &str, now: NaiveDateTime) -> bool {
        match self.clasificar_hora(hora, now) {
            Some(EstadoSlot::Libre) => {
                self.hora = Some(hora.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn limpiar_seleccion(&mut self) {
        self.hora = None;
    }

    /// Classify every slot of the fixed grid for the current court/date.
    /// Pure over (view state, now): re-running with unchanged inputs
    /// yields an identical grid.
    pub fn grilla(&self, now: NaiveDateTime) -> Vec<VistaSlot> {
        let fecha = self.fecha_efectiva(now.date());
        horario::grilla()
            .into_iter()
            .map(|slot| VistaSlot {
                hora: slot.format("%H:%M").to_string(),
                horario: horario::formatear(fecha.and_time(slot)),
                estado: self.clasificar(slot, now),
            })
            .collect()
    }

    /// The confirm control is enabled iff a court type, a date and a
    /// still-free, non-past slot are all selected simultaneously.
    pub fn confirmar_habilitado(&self, now: NaiveDateTime) -> bool {
        self.cancha_tipo.is_some()
            && self.fecha.is_some()
            && self
                .hora
                .as_deref()
                .and_then(|h| self.clasificar_hora(h, now))
                == Some(EstadoSlot::Libre)
    }

    /// Text for the selection display: the composed timestamp, or a prompt
    /// while nothing is selected.
    pub fn etiqueta_seleccion(&self, hoy: NaiveDate) -> String {
        match self.hora.as_deref() {
            Some(hora) => horario::componer(self.fecha, hora, hoy)
                .unwrap_or_else(|_| ELEGI_HORARIO.to_string()),
            None => ELEGI_HORARIO.to_string(),
        }
    }

    /// Build the creation request for the current selection, or fail
    /// locally when the invariant for confirm does not hold.
    pub fn nuevo_turno(&self, now: NaiveDateTime) -> Result<NuevoTurno> {
        if !self.confirmar_habilitado(now) {
            return Err(CanchaError::SinSeleccion);
        }
        let hora = self.hora.as_deref().unwrap_or_default();
        Ok(NuevoTurno {
            horario: horario::componer(self.fecha, hora, now.date())?,
            cancha_tipo: self.cancha_tipo.unwrap_or_default(),
        })
    }
}
