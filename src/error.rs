// Error taxonomy for the clinic store and the menu.
// The Display text of each variant is exactly the line the menu prints,
// so the UI can report a failure with `println!("{}", err)`.

use std::fmt;

use thiserror::Error;

/// Which collection a keyed error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Athlete,
    Appointment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Athlete => f.write_str("Athlete"),
            RecordKind::Appointment => f.write_str("Appointment"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    /// Creation with an identifier that is already in use.
    #[error("{kind} {id} already exists.")]
    DuplicateKey { kind: RecordKind, id: i64 },

    /// Lookup, update or delete of an identifier that is not stored.
    #[error("{kind} {id} not found.")]
    NotFound { kind: RecordKind, id: i64 },

    /// Appointment creation that points at an athlete nobody added.
    #[error("Athlete {0} does not exist. Please add the athlete first.")]
    UnknownAthlete(i64),

    /// Text typed where an integer was expected.
    #[error("Invalid {field}: '{text}' is not an integer.")]
    InvalidInput { field: &'static str, text: String },
}

pub type Result<T> = std::result::Result<T, ClinicError>;

impl ClinicError {
    /// An identifier that is already taken in the `kind` collection.
    #[must_use]
    pub fn duplicate(kind: RecordKind, id: i64) -> Self {
        Self::DuplicateKey { kind, id }
    }

    /// An identifier missing from the `kind` collection.
    #[must_use]
    pub fn not_found(kind: RecordKind, id: i64) -> Self {
        Self::NotFound { kind, id }
    }
}
