//! Interactive confirmation before any query is sent.

use std::io::{BufRead, Write};

use crate::error::{RebaseError, Result};
use crate::startup::RunSettings;

/// Show what is about to run and wait for one line of input.
///
/// Any input, including an empty line or end of input, proceeds.
pub fn confirm<R: BufRead, W: Write>(
    settings: &RunSettings,
    mut input: R,
    mut output: W,
) -> Result<()> {
    write_summary(settings, &mut output).map_err(RebaseError::Prompt)?;
    write!(output, "Press Enter to continue...").map_err(RebaseError::Prompt)?;
    output.flush().map_err(RebaseError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(RebaseError::Prompt)?;
    Ok(())
}

fn write_summary<W: Write>(settings: &RunSettings, output: &mut W) -> std::io::Result<()> {
    writeln!(output, "Prometheus server: {}", settings.server)?;
    writeln!(output, "Rebase time:       {}", settings.rebase_time)?;
    writeln!(output, "Output file:       {}", settings.output_file.display())?;
    writeln!(output, "Metrics to rebase:")?;
    for spec in &settings.metrics {
        writeln!(output, "  {} -> {}", spec.query, spec.output_name)?;
    }
    Ok(())
}
