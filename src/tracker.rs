use std::io::Write;

use log::info;

use crate::error::TrackerError;
use crate::fetch::Source;
use crate::ranges::diff::diff;
use crate::store::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Initialized,
    Unchanged,
    Updated,
}

pub fn run(
    source: &dyn Source,
    store: &dyn Store,
    out: &mut dyn Write,
) -> Result<Outcome, TrackerError> {
    say(out, "Fetching GitHub Actions IP ranges…")?;
    let current = source.fetch()?;
    let previous = store.load()?;
    let location = store.location().display();

    if previous.is_empty() {
        store.save(&current)?;
        info!("initialized cache with {} ranges", current.entry_count());
        say(
            out,
            &format!(
                "No cached IP list found. Cached the current ranges at:\n  {}\n\n\
                 Use these CIDR blocks to update the Cafe24 SSH 허용 IP 목록.\n\
                 Re-run the script later to detect changes automatically.",
                location
            ),
        )?;
        return Ok(Outcome::Initialized);
    }

    let report = diff(&previous, &current);
    if report.is_empty() {
        say(out, "No changes detected. Cached list is up to date.")?;
        return Ok(Outcome::Unchanged);
    }

    info!(
        "{} ranges added, {} removed",
        report.added_count(),
        report.removed_count()
    );
    say(out, "Detected changes in GitHub Actions IP ranges:")?;
    say(out, &report.to_string())?;
    store.save(&current)?;
    say(
        out,
        &format!(
            "Updated cache written to:\n  {}\n\n\
             Apply the Added/Removed CIDR 블록을 Cafe24 설정에 반영하세요.",
            location
        ),
    )?;

    Ok(Outcome::Updated)
}

fn say(out: &mut dyn Write, line: &str) -> Result<(), TrackerError> {
    writeln!(out, "{}", line).map_err(TrackerError::Output)
}
