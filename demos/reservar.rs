use chrono::Local;

use cancha_client::{tira_de_dias, BookingController, CanchaClient, EstadoSlot};

#[tokio::main]
async fn main() {
    let client = CanchaClient::new("http://127.0.0.1:5000");
    client
        .iniciar_sesion("ana@example.com", "secreto")
        .await
        .unwrap();

    let now = Local::now().naive_local();
    let mut ctrl = BookingController::new(client);
    ctrl.cargar(now).await.unwrap();
    println!("Turnos actuales: {}", ctrl.turnos().len());

    for dia in tira_de_dias(now.date()) {
        println!("{} ({})", dia.etiqueta, dia.fecha);
    }

    ctrl.elegir_cancha(2, now).await.unwrap();
    ctrl.elegir_fecha(now.date(), now).await.unwrap();

    for slot in ctrl.vista().grilla(now) {
        println!("{} [{}]", slot.hora, slot.estado);
    }

    let libre = ctrl
        .vista()
        .grilla(now)
        .into_iter()
        .find(|s| s.estado == EstadoSlot::Libre)
        .expect("sin horarios libres");

    ctrl.elegir_hora(&libre.hora, now);
    let turno = ctrl.confirmar(now).await.unwrap();
    println!("Reservado: {} (id {})", turno.horario, turno.id);
}
