//! Property tests for layerwright.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like determinism, key preservation and layer
//! direction soundness.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/naming.rs"]
mod naming;

#[path = "properties/annotate.rs"]
mod annotate;

#[path = "properties/direction.rs"]
mod direction;
