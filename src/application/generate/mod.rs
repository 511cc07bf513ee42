//! Generate Module
//!
//! ## Structure
//!
//! - `options` - `GenerateOptions`
//! - `result` - `GenerateResult`
//! - `use_case` - `GenerateUseCase`
//!
//! ## Usage
//!
//! ```ignore
//! use layerwright::application::generate::{GenerateOptions, GenerateUseCase};
//!
//! let use_case = GenerateUseCase::new(documents, priors, fs, renderer, deriver, emitter);
//! let result = use_case.execute(&GenerateOptions::new("spec.json"))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::GenerateOptions;
pub use result::GenerateResult;
pub use use_case::GenerateUseCase;
