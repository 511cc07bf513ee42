//! Generate command handler

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use layerwright::application::GenerateOptions;
use layerwright::domain::ports::GenerateEventSink;
use layerwright::infrastructure::{ConsoleEventSink, JsonEventSink, RunLock};
use layerwright::presentation::output::TextOutput;
use layerwright::presentation::{factory, BatchArgs, TargetArgs};

pub fn cmd_generate(
    batch: &BatchArgs,
    target: &TargetArgs,
    output: Option<&Path>,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let config = super::load_config(target)?;

    // A dry run writes nothing, so it does not contend for the locks.
    let _lock = if dry_run {
        None
    } else {
        Some(RunLock::acquire(&batch.spec, &target.root)?)
    };

    let use_case = factory::create_generate_use_case(&config, &target.root);
    let options = GenerateOptions::new(&batch.spec)
        .with_output(output.map(PathBuf::from))
        .with_prior(batch.prior.clone())
        .with_selection(super::selection(batch))
        .with_dry_run(dry_run);

    let events: Arc<dyn GenerateEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stderr(verbose))
    };
    let result = use_case.execute_with_events(&options, events)?;

    if !json {
        let view = TextOutput::new(super::supports_unicode(), verbose);
        print!(
            "{}",
            view.generate(&result, &batch.spec, options.output_path())
        );
    }
    Ok(())
}
