pub mod request;
pub mod stage;
pub mod tag;
pub mod version;

pub use request::{BumpKind, Environment, Platform, ReleaseRequest};
pub use stage::{PipelineState, ReleaseStage};
pub use tag::{commit_message, ReleaseTag};
pub use version::VersionState;
