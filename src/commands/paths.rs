//! Paths command handler

use anyhow::Result;

use layerwright::domain::value_objects::LayerKind;
use layerwright::presentation::output::{self, TextOutput};
use layerwright::presentation::{factory, TargetArgs};

pub fn cmd_paths(
    layer: LayerKind,
    class_name: &str,
    base_name: Option<&str>,
    target: &TargetArgs,
    json: bool,
) -> Result<()> {
    let config = super::load_config(target)?;
    let deriver = factory::create_deriver(&config);

    let stem = base_name.unwrap_or(class_name);
    let derivation = deriver.derive_with_stem(layer, class_name, stem)?;
    let register_path =
        (layer == LayerKind::PresentationRouter).then(|| deriver.register_path(stem, None));

    if json {
        output::emit(output::paths_json(&derivation, register_path.as_deref()))?;
    } else {
        print!(
            "{}",
            TextOutput::new(super::supports_unicode(), 0).paths(&derivation, register_path.as_deref())
        );
    }
    Ok(())
}
