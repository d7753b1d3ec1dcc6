//! Turns a poll result into notification intents.

use slot_types::{AppointmentRecord, NotificationIntent, PollResult};

/// One intent per returned slot, in API order.
///
/// Nothing is de-duplicated: the same slot seen on consecutive polls is
/// announced every time.
pub fn evaluate(result: &PollResult) -> Vec<NotificationIntent> {
    if result.is_empty() {
        tracing::info!("No appointment at {}", result.url);
        return Vec::new();
    }

    tracing::info!("Appointment found!");
    tracing::info!("  {}", result.url);

    result
        .appointments
        .iter()
        .map(|appointment| {
            log_appointment(appointment);
            NotificationIntent::new(result.url.clone(), message_for(appointment))
        })
        .collect()
}

pub fn message_for(appointment: &AppointmentRecord) -> String {
    if appointment.is_remote {
        "Remote appointment found!".to_string()
    } else {
        format!("Onsite appointment ({}) found!", appointment.location_id)
    }
}

fn log_appointment(appointment: &AppointmentRecord) {
    if appointment.is_remote {
        tracing::info!("  - Remote appointment at {}!", appointment.display_start());
    } else {
        tracing::info!(
            "  - Appointment found at {} at {}!",
            appointment.location_id,
            appointment.display_start()
        );
    }
}
