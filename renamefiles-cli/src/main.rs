use clap::Parser;
use std::io::{self, IsTerminal};
use std::process;

mod cli;
mod logging;
mod run;
mod settings;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let use_color = !cli.no_color && io::stdout().is_terminal();

    let settings = match settings::resolve(&cli, &settings::default_search_dirs()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    };

    logging::init(settings.log_level);
    if let Some(path) = &settings.config_file {
        tracing::debug!("Using config file: {}", path.display());
    }

    match run::handle_run(&settings.config, cli.output, use_color) {
        Ok(()) => process::exit(0),
        // Already reported at fatal level
        Err(_) => process::exit(1),
    }
}
