use serde::{Deserialize, Serialize};

/// Occupancy for one (court type, date), as reported by the backend.
///
/// Both lists contain full `YYYY-MM-DD HH:MM` timestamps. `mios` are the
/// current user's own reservations; `ocupados` is everything taken,
/// including the user's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Disponibilidad {
    pub ocupados: Vec<String>,
    pub mios: Vec<String>,
}

/// A reservation owned by the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turno {
    pub id: u64,
    pub nombre_reserva: String,
    pub cancha_tipo: u8,
    pub horario: String,
}

/// Request body for creating a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoTurno {
    pub horario: String,
    pub cancha_tipo: u8,
}

/// Error body shape: every backend failure carries a human-readable
/// `mensaje` to display verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct Mensaje {
    pub mensaje: String,
}
