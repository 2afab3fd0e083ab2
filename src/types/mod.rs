pub mod metadata;
pub mod narrative;
pub mod scoring;
