// Clinic store: owns every athlete and appointment and is the only place
// records get created or changed. Nothing in here reads or prints to the
// terminal; the menu in `ui.rs` does that and calls these methods with
// already-typed arguments.

use std::collections::BTreeMap;

use chrono::Local;
use tracing::debug;

use crate::error::{ClinicError, RecordKind, Result};
use crate::models::{
    Appointment, AppointmentId, AppointmentUpdate, Athlete, AthleteId, ProgressEntry,
};

/// In-memory store for athletes and their appointments.
///
/// Appointments keep the athlete id they were created with. That id is
/// checked once, at creation; there is no delete-athlete operation, so it
/// cannot dangle today.
#[derive(Debug, Default)]
pub struct Clinic {
    athletes: BTreeMap<AthleteId, Athlete>,
    appointments: BTreeMap<AppointmentId, Appointment>,
    // When set, stamped on every new progress entry instead of today's date.
    progress_date: Option<String>,
}

impl Clinic {
    /// An empty store that dates progress entries with the local date.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that stamps every progress entry with `date`.
    pub fn with_progress_date(date: impl Into<String>) -> Self {
        Clinic {
            progress_date: Some(date.into()),
            ..Self::default()
        }
    }

    /// Register a new athlete. Fails if the id is already taken, leaving
    /// the existing record untouched.
    pub fn add_athlete(
        &mut self,
        athlete_id: AthleteId,
        name: impl Into<String>,
        age: i64,
        sport: impl Into<String>,
    ) -> Result<&Athlete> {
        if self.athletes.contains_key(&athlete_id) {
            debug!(athlete_id, "rejecting duplicate athlete");
            return Err(ClinicError::duplicate(RecordKind::Athlete, athlete_id));
        }
        let athlete = Athlete::new(athlete_id, name, age, sport);
        debug!(athlete_id, name = %athlete.name, "athlete added");
        Ok(self.athletes.entry(athlete_id).or_insert(athlete))
    }

    pub fn get_athlete(&self, athlete_id: AthleteId) -> Result<&Athlete> {
        self.athletes
            .get(&athlete_id)
            .ok_or(ClinicError::not_found(RecordKind::Athlete, athlete_id))
    }

    /// Schedule an appointment for an existing athlete.
    ///
    /// The athlete check runs first, so an unknown athlete is reported even
    /// when the appointment id is also a duplicate.
    pub fn create_appointment(
        &mut self,
        appointment_id: AppointmentId,
        athlete_id: AthleteId,
        date: impl Into<String>,
        time: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<&Appointment> {
        if !self.athletes.contains_key(&athlete_id) {
            debug!(appointment_id, athlete_id, "appointment for unknown athlete");
            return Err(ClinicError::UnknownAthlete(athlete_id));
        }
        if self.appointments.contains_key(&appointment_id) {
            debug!(appointment_id, "rejecting duplicate appointment");
            return Err(ClinicError::duplicate(RecordKind::Appointment, appointment_id));
        }
        let appointment = Appointment {
            appointment_id,
            athlete_id,
            date: date.into(),
            time: time.into(),
            reason: reason.into(),
        };
        debug!(appointment_id, athlete_id, "appointment created");
        Ok(self.appointments.entry(appointment_id).or_insert(appointment))
    }

    pub fn get_appointment(&self, appointment_id: AppointmentId) -> Result<&Appointment> {
        self.appointments
            .get(&appointment_id)
            .ok_or(ClinicError::not_found(RecordKind::Appointment, appointment_id))
    }

    /// Apply a partial update. Fields missing from `update` keep their
    /// current value. The athlete reference is not re-checked.
    pub fn update_appointment(
        &mut self,
        appointment_id: AppointmentId,
        update: &AppointmentUpdate,
    ) -> Result<&Appointment> {
        let appointment = self
            .appointments
            .get_mut(&appointment_id)
            .ok_or(ClinicError::not_found(RecordKind::Appointment, appointment_id))?;
        appointment.apply(update);
        debug!(appointment_id, ?update, "appointment updated");
        Ok(appointment)
    }

    /// Remove an appointment and hand it back.
    pub fn delete_appointment(&mut self, appointment_id: AppointmentId) -> Result<Appointment> {
        let removed = self
            .appointments
            .remove(&appointment_id)
            .ok_or(ClinicError::not_found(RecordKind::Appointment, appointment_id))?;
        debug!(appointment_id, "appointment deleted");
        Ok(removed)
    }

    /// Every appointment booked for `athlete_id`, by ascending appointment
    /// id. An athlete with no bookings (or no record at all) yields an
    /// empty list.
    pub fn appointments_for_athlete(&self, athlete_id: AthleteId) -> Vec<&Appointment> {
        self.appointments
            .values()
            .filter(|appt| appt.athlete_id == athlete_id)
            .collect()
    }

    /// Append a dated note to an athlete's health log.
    pub fn record_health_progress(
        &mut self,
        athlete_id: AthleteId,
        progress: impl Into<String>,
    ) -> Result<&ProgressEntry> {
        let date = self.progress_date();
        let athlete = self
            .athletes
            .get_mut(&athlete_id)
            .ok_or(ClinicError::not_found(RecordKind::Athlete, athlete_id))?;
        athlete.add_health_progress(ProgressEntry {
            date,
            progress: progress.into(),
        });
        let log = athlete.view_health_progress();
        debug!(athlete_id, entries = log.len(), "health progress recorded");
        log.last().ok_or(ClinicError::not_found(RecordKind::Athlete, athlete_id))
    }

    pub fn athlete_count(&self) -> usize {
        self.athletes.len()
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.len()
    }

    fn progress_date(&self) -> String {
        match &self.progress_date {
            Some(date) => date.clone(),
            None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
        }
    }
}
