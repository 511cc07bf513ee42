//! Artifact renderers

mod skeleton;

pub use skeleton::SkeletonRenderer;
