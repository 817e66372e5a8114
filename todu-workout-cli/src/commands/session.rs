//! Interactive workout logging session.
//!
//! The log lives in memory for as long as the session runs.

use clap::Args;
use std::io::{self, BufRead, Write};

use todu_workout_core::log::DEFAULT_POPULAR_LIMIT;
use todu_workout_core::{ViewCache, WorkoutLog};

const MENU: &str = "Choose an option: [1] Add workout [2] List workouts [3] Summary \
                    [4] Popular workouts [5] Exit: ";

#[derive(Args)]
pub struct SessionCommand {}

impl SessionCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut log = WorkoutLog::new();
        run_session(&mut stdin.lock(), &mut stdout.lock(), &mut log)?;
        tracing::debug!(entries = log.len(), "Session ended");
        Ok(())
    }
}

/// Drives the menu loop until the user exits or input ends.
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    log: &mut WorkoutLog,
) -> io::Result<()> {
    let mut cache = ViewCache::new();

    loop {
        let Some(choice) = prompt(input, output, MENU)? else {
            writeln!(output)?;
            return Ok(());
        };

        match choice.as_str() {
            "1" => add_workout(input, output, log)?,
            "2" => list_workouts(input, output, log, &mut cache)?,
            "3" => show_summary(output, log)?,
            "4" => show_popular(output, log)?,
            "5" => {
                writeln!(output, "Exiting.")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid option, please try again.")?,
        }
    }
}

/// Writes `text` and reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add_workout<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    log: &mut WorkoutLog,
) -> io::Result<()> {
    writeln!(output, "Enter workout details")?;
    let workout_type = prompt(input, output, "Workout type: ")?.unwrap_or_default();
    let duration = prompt(input, output, "Duration (in minutes): ")?.unwrap_or_default();
    let intensity = prompt(
        input,
        output,
        "Intensity (Low/Medium/High, blank for none): ",
    )?
    .unwrap_or_default();

    match log.add_entry(&workout_type, &duration, Some(intensity.as_str())) {
        Ok(entry) => writeln!(output, "Workout added: {}", entry),
        Err(e) => {
            tracing::debug!("Rejected workout: {}", e);
            writeln!(output, "Workout not added: {}", e)
        }
    }
}

fn list_workouts<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    log: &WorkoutLog,
    cache: &mut ViewCache,
) -> io::Result<()> {
    if log.is_empty() {
        return writeln!(output, "No workouts logged yet.");
    }

    let types = log.distinct_types().join(", ");
    let filter = prompt(
        input,
        output,
        &format!("Filter by type (blank for all) [{}]: ", types),
    )?
    .unwrap_or_default();

    let view = cache.view(log, Some(filter.as_str()));
    if view.is_empty() {
        return writeln!(output, "No '{}' workouts logged.", filter);
    }
    for entry in view {
        writeln!(output, "  {}", entry)?;
    }
    writeln!(output, "\nTotal: {} workout(s)", view.len())
}

fn show_summary<W: Write>(output: &mut W, log: &WorkoutLog) -> io::Result<()> {
    let summary = log.summary();
    writeln!(output, "Workout Summary")?;
    writeln!(output, "{}", "=".repeat(15))?;
    writeln!(output, "  Workouts: {}", summary.count)?;
    writeln!(output, "  Total minutes: {}", summary.total_minutes)?;
    writeln!(output, "  Average minutes: {:.1}", summary.average_minutes)?;
    if let (Some(shortest), Some(longest)) = (summary.shortest_minutes, summary.longest_minutes) {
        writeln!(output, "  Shortest: {} min", shortest)?;
        writeln!(output, "  Longest: {} min", longest)?;
    }
    Ok(())
}

fn show_popular<W: Write>(output: &mut W, log: &WorkoutLog) -> io::Result<()> {
    let popular = log.popular(DEFAULT_POPULAR_LIMIT);
    if popular.is_empty() {
        return writeln!(output, "No workouts logged yet.");
    }

    writeln!(output, "Most popular workouts & intensities:")?;
    for row in popular {
        let intensity = row
            .intensity
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            output,
            "  {:12} {:8} {}x",
            row.workout_type, intensity, row.frequency
        )?;
    }
    Ok(())
}
