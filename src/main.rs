//! Layerwright CLI - declarative layered code generator
//!
//! Usage: layerwright <COMMAND>
//!
//! Commands:
//!   generate  Validate, resolve and emit a spec batch, then annotate the document
//!   check     Validate, direction-check and resolve only
//!   diff      Preview changes without writing
//!   paths     Print the identifier and paths derived for a class

mod commands;

use clap::Parser;

use layerwright::error::LayerwrightError;
use layerwright::presentation::output::{self, TextOutput};
use layerwright::presentation::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    let command = cli.command.name();

    if let Err(err) = run(cli) {
        report_error(&err, command, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            batch,
            target,
            output,
            dry_run,
        } => commands::cmd_generate(
            batch,
            target,
            output.as_deref(),
            *dry_run,
            cli.json,
            cli.verbose,
        ),
        Commands::Check { batch, target } => {
            commands::cmd_check(batch, target, cli.json, cli.verbose)
        }
        Commands::Diff {
            batch,
            target,
            context,
        } => commands::cmd_diff(batch, target, *context, cli.json, cli.verbose),
        Commands::Paths {
            layer,
            class_name,
            base_name,
            target,
        } => commands::cmd_paths(*layer, class_name, base_name.as_deref(), target, cli.json),
    }
}

fn report_error(err: &anyhow::Error, command: &str, json: bool) {
    let rejection = match err.downcast_ref::<LayerwrightError>() {
        Some(LayerwrightError::Rejected(rejection)) => Some(rejection),
        _ => None,
    };

    if json {
        // generate already streamed the rejection through its event sink
        let event = match rejection {
            Some(_) if command == "generate" => return,
            Some(rejection) => output::rejection_json(command, rejection),
            None => output::error_json(command, &format!("{:#}", err)),
        };
        let _ = output::emit(event);
        return;
    }

    match rejection {
        Some(rejection) => eprint!(
            "{}",
            TextOutput::new(commands::supports_unicode(), 0).rejection(rejection)
        ),
        None => eprintln!("Error: {:#}", err),
    }
}
