pub mod github;
pub mod snapshot;
