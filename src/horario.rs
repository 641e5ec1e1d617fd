use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use itertools::Itertools;

use crate::error::Result;

/// First bookable hour of the day.
pub const APERTURA: u32 = 8;
/// First non-bookable hour; the last slot starts half an hour before.
pub const CIERRE: u32 = 24;

/// Canonical `YYYY-MM-DD HH:MM` timestamp, zero-padded, 24-hour, local
/// wall-clock with no timezone conversion. Occupancy comparison against
/// the backend's `ocupados`/`mios` lists is plain string equality on this
/// format, so it must be injective over (date, time).
pub fn formatear(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

/// Compose a full timestamp from a bare `HH:MM` slot label and the
/// selected date, defaulting to today when no date is selected.
pub fn componer(fecha: Option<NaiveDate>, hora: &str, hoy: NaiveDate) -> Result<String> {
    let hora = NaiveTime::parse_from_str(hora, "%H:%M")?;
    Ok(formatear(fecha.unwrap_or(hoy).and_time(hora)))
}

/// The fixed half-hour slot grid for one day, `APERTURA:00` through
/// `CIERRE - 1:30` inclusive.
pub fn grilla() -> Vec<NaiveTime> {
    (APERTURA..CIERRE)
        .cartesian_product([0, 30])
        .filter_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn compone_fecha_seleccionada_mas_hora() {
        let hoy = fecha("2024-05-20");
        let ts = componer(Some(fecha("2024-06-01")), "09:30", hoy).unwrap();
        assert_eq!(ts, "2024-06-01 09:30");
    }

    #[test]
    fn sin_fecha_seleccionada_usa_hoy() {
        let hoy = fecha("2024-05-20");
        assert_eq!(componer(None, "07:05", hoy).unwrap(), "2024-05-20 07:05");
    }

    #[test]
    fn formatea_con_cero_a_la_izquierda() {
        let t = fecha("2024-01-02").and_time(NaiveTime::from_hms_opt(3, 4, 0).unwrap());
        assert_eq!(formatear(t), "2024-01-02 03:04");
    }

    #[test]
    fn hora_invalida_es_error() {
        assert!(componer(None, "25:00", fecha("2024-05-20")).is_err());
        assert!(componer(None, "nada", fecha("2024-05-20")).is_err());
    }

    #[test]
    fn la_grilla_cubre_el_dia_en_medias_horas() {
        let slots = grilla();
        assert_eq!(slots.len() as u32, (CIERRE - APERTURA) * 2);
        assert_eq!(slots.first().unwrap().format("%H:%M").to_string(), "08:00");
        assert_eq!(slots.last().unwrap().format("%H:%M").to_string(), "23:30");
    }
}
