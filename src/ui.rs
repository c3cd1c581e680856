// UI layer: the numbered clinic menu.
// The loop only reads answers, turns them into typed values and calls the
// `Clinic` store. Where the text comes from is hidden behind `Console`, so
// the same loop runs on a terminal (via `dialoguer`), on piped stdin, or
// against an in-memory buffer in tests.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use dialoguer::console::Term;
use dialoguer::{theme::SimpleTheme, Input};
use thiserror::Error;
use tracing::debug;

use crate::clinic::Clinic;
use crate::error::ClinicError;
use crate::models::AppointmentUpdate;

/// Menu lines, printed after a blank line before every choice.
pub const MENU: [&str; 9] = [
    "1. Add Athlete",
    "2. Create Appointment",
    "3. View Appointment",
    "4. Update Appointment",
    "5. Delete Appointment",
    "6. List Athlete's Appointments",
    "7. Track Athlete Health Progress",
    "8. Get Athlete Info",
    "9. Exit",
];

/// Where the menu reads answers from and writes lines to.
pub trait Console {
    /// Show `label` as `"{label}: "` and read one line of input.
    /// Returns `Ok(None)` once the input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>>;

    /// Print one line of output.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// Plain line-by-line console over any reader/writer pair. Used for piped
/// stdin and for driving the menu from tests.
#[derive(Debug)]
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineConsole { input, output }
    }

    /// Give back the writer, e.g. to inspect what a test session printed.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }
}

/// Interactive terminal console. `SimpleTheme` renders prompts as
/// `"{label}: "`, the same text `LineConsole` writes. Prompts and menu
/// lines share one terminal handle on stdout.
#[derive(Debug)]
pub struct TermConsole {
    term: Term,
}

impl TermConsole {
    pub fn stdout() -> Self {
        TermConsole { term: Term::stdout() }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Console for TermConsole {
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        // Empty answers are meaningful ("keep current value") on update.
        let answer = Input::<String>::with_theme(&SimpleTheme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text_on(&self.term);
        match answer {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }
}

/// Why a single menu action stopped early.
#[derive(Debug, Error)]
enum Interrupt {
    /// The store (or number parsing) refused; report it and carry on.
    #[error(transparent)]
    Clinic(#[from] ClinicError),
    /// Input ran out halfway through an action.
    #[error("input closed")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

type Action = std::result::Result<(), Interrupt>;

/// Run the menu until the user picks "Exit" or input runs out.
///
/// Store errors and malformed numbers are printed and the menu is shown
/// again; only a failing console ends the loop with an error.
pub fn main_menu(clinic: &mut Clinic, console: &mut impl Console) -> Result<()> {
    loop {
        console.say("")?;
        for line in MENU {
            console.say(line)?;
        }

        let Some(choice) = console.prompt("Enter your choice")? else {
            debug!("input closed at menu");
            break;
        };

        let outcome = match choice.trim() {
            "1" => add_athlete(clinic, console),
            "2" => create_appointment(clinic, console),
            "3" => view_appointment(clinic, console),
            "4" => update_appointment(clinic, console),
            "5" => delete_appointment(clinic, console),
            "6" => list_appointments(clinic, console),
            "7" => track_health_progress(clinic, console),
            "8" => athlete_info(clinic, console),
            "9" => break,
            _ => {
                console.say("Invalid choice. Please try again.")?;
                continue;
            }
        };

        match outcome {
            Ok(()) => {}
            Err(Interrupt::Clinic(err)) => {
                debug!(error = %err, "menu action failed");
                console.say(&err.to_string())?;
            }
            Err(Interrupt::InputClosed) => {
                debug!("input closed mid-action");
                break;
            }
            Err(Interrupt::Io(err)) => return Err(err).context("console I/O failed"),
        }
    }
    Ok(())
}

fn ask(console: &mut impl Console, label: &str) -> std::result::Result<String, Interrupt> {
    console.prompt(label)?.ok_or(Interrupt::InputClosed)
}

fn ask_number(
    console: &mut impl Console,
    label: &str,
    field: &'static str,
) -> std::result::Result<i64, Interrupt> {
    let text = ask(console, label)?;
    let parsed = text.trim().parse::<i64>();
    match parsed {
        Ok(n) => Ok(n),
        Err(_) => Err(ClinicError::InvalidInput { field, text }.into()),
    }
}

fn add_athlete(clinic: &mut Clinic, console: &mut impl Console) -> Action {
    let athlete_id = ask_number(console, "Enter Athlete ID", "athlete ID")?;
    let name = ask(console, "Enter Athlete Name")?;
    let age = ask_number(console, "Enter Athlete Age", "age")?;
    let sport = ask(console, "Enter Athlete Sport")?;

    clinic.add_athlete(athlete_id, name, age, sport)?;
    console.say(&format!("Athlete {} added.", athlete_id))?;
    Ok(())
}

fn create_appointment(clinic: &mut Clinic, console: &mut impl Console) -> Action {
    let appointment_id = ask_number(console, "Enter Appointment ID", "appointment ID")?;
    let athlete_id = ask_number(console, "Enter Athlete ID", "athlete ID")?;
    let date = ask(console, "Enter Appointment Date (YYYY-MM-DD)")?;
    let time = ask(console, "Enter Appointment Time (HH:MM)")?;
    let reason = ask(console, "Enter Appointment Reason (e.g., Injury Check, Physiotherapy)")?;

    clinic.create_appointment(appointment_id, athlete_id, date, time, reason)?;
    console.say(&format!(
        "Appointment {} created for athlete {}.",
        appointment_id, athlete_id
    ))?;
    Ok(())
}

fn view_appointment(clinic: &mut Clinic, console: &mut impl Console) -> Action {
    let appointment_id = ask_number(console, "Enter Appointment ID", "appointment ID")?;
    let appt = clinic.get_appointment(appointment_id)?;
    console.say(&format!(
        "Appointment Details: {}, {}, {}",
        appt.date, appt.time, appt.reason
    ))?;
    Ok(())
}

fn update_appointment(clinic: &mut Clinic, console: &mut impl Console) -> Action {
    let appointment_id = ask_number(console, "Enter Appointment ID", "appointment ID")?;
    // Fail fast, before asking for the new values.
    clinic.get_appointment(appointment_id)?;

    let date = ask(console, "Enter new date (leave blank to keep the current date)")?;
    let time = ask(console, "Enter new time (leave blank to keep the current time)")?;
    let reason = ask(console, "Enter new reason (leave blank to keep the current reason)")?;

    let update = AppointmentUpdate::from_input(&date, &time, &reason);
    clinic.update_appointment(appointment_id, &update)?;
    console.say(&format!("Appointment {} updated.", appointment_id))?;
    Ok(())
}

fn delete_appointment(clinic: &mut Clinic, console: &mut impl Console) -> Action {
    let appointment_id = ask_number(console, "Enter Appointment ID", "appointment ID")?;
    clinic.delete_appointment(appointment_id)?;
    console.say(&format!("Appointment {} deleted.", appointment_id))?;
    Ok(())
}

fn list_appointments(clinic: &mut Clinic, console: &mut impl Console) -> Action {
    let athlete_id = ask_number(console, "Enter Athlete ID", "athlete ID")?;
    let appointments = clinic.appointments_for_athlete(athlete_id);
    if appointments.is_empty() {
        console.say(&format!("No appointments found for athlete {}.", athlete_id))?;
    }
    for a in appointments {
        console.say(&format!("Appointment on {} at {} for {}", a.date, a.time, a.reason))?;
    }
    Ok(())
}

fn track_health_progress(clinic: &mut Clinic, console: &mut impl Console) -> Action {
    let athlete_id = ask_number(console, "Enter Athlete ID", "athlete ID")?;
    let progress = ask(console, "Enter health progress details (e.g., Improving flexibility)")?;

    clinic.record_health_progress(athlete_id, progress)?;
    console.say(&format!("Health progress for athlete {} updated.", athlete_id))?;
    Ok(())
}

fn athlete_info(clinic: &mut Clinic, console: &mut impl Console) -> Action {
    let athlete_id = ask_number(console, "Enter Athlete ID", "athlete ID")?;
    let athlete = clinic.get_athlete(athlete_id)?;
    console.say(&format!(
        "Athlete {}: {}, Age: {}, Sport: {}",
        athlete_id, athlete.name, athlete.age, athlete.sport
    ))?;
    for entry in athlete.view_health_progress() {
        console.say(&format!("  {}: {}", entry.date, entry.progress))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(clinic: &mut Clinic, input: &str) -> String {
        let mut console = LineConsole::new(Cursor::new(input.to_string()), Vec::new());
        main_menu(clinic, &mut console).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn line_console_writes_prompt_and_strips_newline() {
        let mut console = LineConsole::new(Cursor::new("42\r\n"), Vec::new());
        let answer = console.prompt("Enter Athlete ID").unwrap();
        assert_eq!(answer.as_deref(), Some("42"));
        assert_eq!(console.prompt("Enter Athlete ID").unwrap(), None);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out, "Enter Athlete ID: Enter Athlete ID: ");
    }

    #[test]
    fn terminal_console_writes_to_stdout() {
        let console = TermConsole::default();
        assert!(matches!(
            console.term().target(),
            dialoguer::console::TermTarget::Stdout
        ));
    }

    #[test]
    fn negative_ids_and_ages_are_accepted() {
        let mut clinic = Clinic::new();
        let out = run(&mut clinic, "1\n-1\nJane\n-24\nSwim\n8\n-1\n9\n");
        assert!(out.contains("Athlete -1 added."));
        assert!(out.contains("Athlete -1: Jane, Age: -24, Sport: Swim"));
        assert!(!out.contains("Invalid"));
        assert_eq!(clinic.get_athlete(-1).unwrap().age, -24);
    }

    #[test]
    fn invalid_choice_redisplays_menu() {
        let mut clinic = Clinic::new();
        let out = run(&mut clinic, "x\n9\n");
        assert!(out.contains("Invalid choice. Please try again."));
        assert_eq!(out.matches("9. Exit").count(), 2);
    }

    #[test]
    fn malformed_number_is_reported_and_loop_continues() {
        let mut clinic = Clinic::new();
        let out = run(&mut clinic, "1\n1\nJane Doe\ntwenty\n8\n1\n9\n");
        assert!(out.contains("Invalid age: 'twenty' is not an integer."));
        assert!(out.contains("Athlete 1 not found."));
        assert_eq!(clinic.athlete_count(), 0);
    }

    #[test]
    fn end_of_input_mid_action_exits_cleanly() {
        let mut clinic = Clinic::new();
        let out = run(&mut clinic, "1\n5\nJane");
        assert!(out.ends_with("Enter Athlete Age: "));
        assert_eq!(clinic.athlete_count(), 0);
    }

    #[test]
    fn update_of_unknown_appointment_skips_field_prompts() {
        let mut clinic = Clinic::new();
        let out = run(&mut clinic, "4\n77\n9\n");
        assert!(out.contains("Appointment 77 not found."));
        assert!(!out.contains("Enter new date"));
    }
}
