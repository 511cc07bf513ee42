//! Diff command handler

use anyhow::Result;

use layerwright::application::DiffOptions;
use layerwright::presentation::output::{self, TextOutput};
use layerwright::presentation::{factory, BatchArgs, TargetArgs};

pub fn cmd_diff(
    batch: &BatchArgs,
    target: &TargetArgs,
    context: usize,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let config = super::load_config(target)?;
    let use_case = factory::create_diff_use_case(&config, &target.root);
    let options = DiffOptions::new(&batch.spec)
        .with_prior(batch.prior.clone())
        .with_selection(super::selection(batch))
        .with_context(context);

    let result = use_case.execute(&options)?;

    if json {
        output::emit(output::diff_json(&result))?;
    } else {
        print!(
            "{}",
            TextOutput::new(super::supports_unicode(), verbose).diff(&result)
        );
    }
    Ok(())
}
