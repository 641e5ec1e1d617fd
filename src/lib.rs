pub use booking::{BookingController, TurnosApi};
pub use client::CanchaClient;
pub use dias::tira_de_dias;
pub use error::{CanchaError, Result};
pub use view::{BookingView, Consulta, EstadoSlot, VistaSlot};

pub mod booking;
pub mod client;
pub mod dias;
pub mod error;
pub mod horario;
pub mod model;
pub mod view;
