//! Round-Trip Metadata Writer
//!
//! Writes artifact locations back onto the spec items that produced them.
//! Only the writer-owned keys are touched; item order and every other key
//! survive unchanged.

use serde_json::Value;

use crate::domain::entities::Artifact;
use crate::domain::value_objects::LayerKind;
use crate::error::AnnotateError;

pub const CODE_PATH: &str = "code_path";
pub const CODE_RAW_URL: &str = "code_raw_url";
pub const TEST_PATH: &str = "test_path";
pub const TEST_RAW_URL: &str = "test_raw_url";
pub const REGISTER_PATH: &str = "register_path";

/// Return a copy of `document` with each artifact's locations written onto
/// its owning item.
///
/// Artifacts are matched by document index and the item's identity is
/// verified, so a document edited since validation is refused instead of
/// annotated wrongly. Keys with no value for this run (no test, no raw URL
/// template) are left as they are.
pub fn annotate(document: &Value, artifacts: &[Artifact]) -> Result<Value, AnnotateError> {
    let mut updated = document.clone();
    let items = updated.as_array_mut().ok_or(AnnotateError::NotAnArray)?;

    for artifact in artifacts {
        let owner = &artifact.owner;
        let item = items
            .get_mut(owner.index)
            .ok_or_else(|| AnnotateError::IndexOutOfRange {
                owner: owner.clone(),
            })?;

        let same_identity = item.get("class_name").and_then(Value::as_str)
            == Some(owner.class_name.as_str())
            && item
                .get("layer")
                .and_then(Value::as_str)
                .and_then(LayerKind::parse)
                == Some(owner.layer);
        let fields = match item.as_object_mut() {
            Some(fields) if same_identity => fields,
            _ => {
                return Err(AnnotateError::IdentityMismatch {
                    index: owner.index,
                    owner: owner.clone(),
                })
            }
        };

        fields.insert(CODE_PATH.to_string(), Value::from(artifact.code_path.clone()));
        let optional = [
            (CODE_RAW_URL, &artifact.code_raw_url),
            (TEST_PATH, &artifact.test_path),
            (TEST_RAW_URL, &artifact.test_raw_url),
            (REGISTER_PATH, &artifact.register_path),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::from(value.clone()));
            }
        }
    }

    Ok(updated)
}

/// Serialize a metadata document the way it is stored on disk:
/// two-space indent and a trailing newline
pub fn to_pretty_json(document: &Value) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}
