//! Check command handler

use anyhow::Result;

use layerwright::application::CheckOptions;
use layerwright::presentation::output::{self, TextOutput};
use layerwright::presentation::{factory, BatchArgs, TargetArgs};

/// Validate, direction-check and resolve. Exits with status 1 on findings.
pub fn cmd_check(batch: &BatchArgs, target: &TargetArgs, json: bool, verbose: u8) -> Result<()> {
    let config = super::load_config(target)?;
    let use_case = factory::create_check_use_case(&config);
    let options = CheckOptions::new(&batch.spec)
        .with_prior(batch.prior.clone())
        .with_selection(super::selection(batch));

    let result = use_case.execute(&options)?;

    if json {
        if let Some(rejection) = &result.rejection {
            output::emit(output::rejection_json("check", rejection))?;
        }
        output::emit(output::check_json(&result))?;
    } else {
        let view = TextOutput::new(super::supports_unicode(), verbose);
        let text = view.check(&result, &batch.spec);
        if result.is_success() {
            print!("{}", text);
        } else {
            eprint!("{}", text);
        }
    }

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
