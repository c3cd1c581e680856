// Record types held by the clinic store.
// These are plain data shapes; the store in `clinic.rs` is the only thing
// that creates or mutates them.

use serde::Serialize;

/// Identifier of an athlete. Unique within a store.
pub type AthleteId = i64;

/// Identifier of an appointment. Unique within a store.
pub type AppointmentId = i64;

/// A dated free-text note in an athlete's health log.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub date: String,
    pub progress: String,
}

/// A tracked athlete and their health-progress log.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Athlete {
    pub athlete_id: AthleteId,
    pub name: String,
    pub age: i64,
    pub sport: String,
    // Append-only: entries are never edited or removed.
    health_progress: Vec<ProgressEntry>,
}

impl Athlete {
    pub fn new(
        athlete_id: AthleteId,
        name: impl Into<String>,
        age: i64,
        sport: impl Into<String>,
    ) -> Self {
        Athlete {
            athlete_id,
            name: name.into(),
            age,
            sport: sport.into(),
            health_progress: Vec::new(),
        }
    }

    /// Append a progress entry to the end of the log.
    pub fn add_health_progress(&mut self, entry: ProgressEntry) {
        self.health_progress.push(entry);
    }

    /// All progress entries in the order they were recorded.
    pub fn view_health_progress(&self) -> &[ProgressEntry] {
        &self.health_progress
    }
}

/// A scheduled clinic visit for one athlete.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub appointment_id: AppointmentId,
    pub athlete_id: AthleteId,
    pub date: String,
    pub time: String,
    pub reason: String,
}

impl Appointment {
    /// Overwrite only the fields the update carries.
    pub fn apply(&mut self, update: &AppointmentUpdate) {
        if let Some(date) = &update.date {
            self.date = date.clone();
        }
        if let Some(time) = &update.time {
            self.time = time.clone();
        }
        if let Some(reason) = &update.reason {
            self.reason = reason.clone();
        }
    }
}

/// A partial change to an appointment. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentUpdate {
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: Option<String>,
}

impl AppointmentUpdate {
    /// Build an update from raw user text, where a blank answer means
    /// "leave this field as it is".
    pub fn from_input(date: &str, time: &str, reason: &str) -> Self {
        AppointmentUpdate {
            date: non_blank(date),
            time: non_blank(time),
            reason: non_blank(reason),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.reason.is_none()
    }
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physio() -> Appointment {
        Appointment {
            appointment_id: 100,
            athlete_id: 1,
            date: "2025-01-10".into(),
            time: "09:00".into(),
            reason: "Physiotherapy".into(),
        }
    }

    #[test]
    fn progress_log_starts_empty_and_keeps_order() {
        let mut athlete = Athlete::new(1, "Jane Doe", 24, "Swimming");
        assert!(athlete.view_health_progress().is_empty());

        athlete.add_health_progress(ProgressEntry {
            date: "2025-01-01".into(),
            progress: "Sore knee".into(),
        });
        athlete.add_health_progress(ProgressEntry {
            date: "2025-01-08".into(),
            progress: "Knee better".into(),
        });

        let log = athlete.view_health_progress();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].progress, "Sore knee");
        assert_eq!(log[1].progress, "Knee better");
    }

    #[test]
    fn blank_answers_become_missing_fields() {
        let update = AppointmentUpdate::from_input("", "10:00", "   ");
        assert_eq!(update.date, None);
        assert_eq!(update.time.as_deref(), Some("10:00"));
        assert_eq!(update.reason, None);
        assert!(AppointmentUpdate::from_input("", "", "").is_empty());
    }

    #[test]
    fn apply_touches_only_supplied_fields() {
        let mut appt = physio();
        appt.apply(&AppointmentUpdate {
            reason: Some("Injury Check".into()),
            ..Default::default()
        });
        assert_eq!(appt.date, "2025-01-10");
        assert_eq!(appt.time, "09:00");
        assert_eq!(appt.reason, "Injury Check");
    }

    #[test]
    fn progress_entry_serializes_as_date_progress_mapping() {
        let entry = ProgressEntry {
            date: "2024-09-25".into(),
            progress: "Improving flexibility".into(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"date": "2024-09-25", "progress": "Improving flexibility"})
        );
    }
}
