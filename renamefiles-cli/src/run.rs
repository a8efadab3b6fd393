use renamefiles_core::{run_operation, Config, OutputFormatter, RunError, TracingSink};

use crate::cli::OutputFormat;

pub fn handle_run(config: &Config, output: OutputFormat, use_color: bool) -> Result<(), RunError> {
    // Fatal errors are already logged by the sink
    let report = run_operation(config, &TracingSink)?;

    let rendered = match output {
        OutputFormat::Summary => report.format_summary_with_color(use_color),
        OutputFormat::Json => format!("{}\n", report.format(output.into())),
    };
    print!("{rendered}");

    Ok(())
}
