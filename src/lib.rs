// Library root
// -----------
// This crate exposes the clinic record keeper as a library. The binary
// (`main.rs`) wires these modules together into the interactive menu.
//
// Module responsibilities:
// - `models`: Athlete, Appointment and progress entry records.
// - `clinic`: The in-memory store. All create/read/update/delete logic
//   lives here and none of it touches the terminal.
// - `error`: The error taxonomy reported by the store and the menu.
// - `config`: Settings read from the environment at startup.
// - `logging`: tracing subscriber setup.
// - `ui`: The numbered menu loop and the console back-ends it talks to.
//
// Keeping the store free of I/O means it can be tested directly, and the
// menu stays a thin adapter that turns typed text into store calls.
pub mod clinic;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

pub use clinic::Clinic;
pub use error::{ClinicError, RecordKind};
