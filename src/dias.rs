use chrono::{Datelike, Days, NaiveDate, Weekday};

/// One choice in the day strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dia {
    pub fecha: NaiveDate,
    pub etiqueta: String,
}

fn abreviatura(dia: Weekday) -> &'static str {
    match dia {
        Weekday::Mon => "Lun",
        Weekday::Tue => "Mar",
        Weekday::Wed => "Mié",
        Weekday::Thu => "Jue",
        Weekday::Fri => "Vie",
        Weekday::Sat => "Sáb",
        Weekday::Sun => "Dom",
    }
}

/// The seven selectable days starting today: "Hoy", "Mañana", then
/// `<weekday-abbrev> DD/MM`.
pub fn tira_de_dias(hoy: NaiveDate) -> Vec<Dia> {
    (0..7)
        .map(|i| {
            let fecha = hoy.checked_add_days(Days::new(i)).unwrap_or(hoy);
            let etiqueta = match i {
                0 => "Hoy".to_string(),
                1 => "Mañana".to_string(),
                _ => format!(
                    "{} {:02}/{:02}",
                    abreviatura(fecha.weekday()),
                    fecha.day(),
                    fecha.month()
                ),
            };
            Dia { fecha, etiqueta }
        })
        .collect()
}
