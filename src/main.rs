// Entrypoint for the clinic CLI.
// - Keeps `main` small: read settings, build the store, hand it to the menu.
// - Returns `anyhow::Result` so startup and console failures print cleanly.

use std::io::{self, IsTerminal};

use clinic_cli::config::Config;
use clinic_cli::logging::init_logging;
use clinic_cli::ui::{main_menu, LineConsole, TermConsole};
use clinic_cli::Clinic;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Settings come from `CLINIC_PROGRESS_DATE` and `CLINIC_LOG`; see
    // `config::Config::from_env`.
    let config = Config::from_env()?;
    init_logging(&config.log_filter);

    let mut clinic = match &config.progress_date {
        Some(date) => Clinic::with_progress_date(date.clone()),
        None => Clinic::new(),
    };
    info!(progress_date = ?config.progress_date, "clinic session started");

    // A real terminal gets dialoguer's line editing; piped input is read
    // line by line so scripted sessions behave the same.
    if io::stdin().is_terminal() {
        main_menu(&mut clinic, &mut TermConsole::stdout())?;
    } else {
        let mut console = LineConsole::new(io::stdin().lock(), io::stdout().lock());
        main_menu(&mut clinic, &mut console)?;
    }

    info!(
        athletes = clinic.athlete_count(),
        appointments = clinic.appointment_count(),
        "clinic session ended"
    );
    Ok(())
}
