use std::fmt;

/// One externally visible step of the release pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseStage {
    Bump,
    Commit,
    Push,
    Tag,
    PushTag,
}

impl ReleaseStage {
    pub const ALL: [ReleaseStage; 5] = [
        ReleaseStage::Bump,
        ReleaseStage::Commit,
        ReleaseStage::Push,
        ReleaseStage::Tag,
        ReleaseStage::PushTag,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReleaseStage::Bump => "bump",
            ReleaseStage::Commit => "commit",
            ReleaseStage::Push => "push",
            ReleaseStage::Tag => "tag",
            ReleaseStage::PushTag => "push-tag",
        }
    }

    /// State the pipeline reaches once this stage succeeds
    pub fn completes_to(&self) -> PipelineState {
        match self {
            ReleaseStage::Bump => PipelineState::Bumped,
            ReleaseStage::Commit => PipelineState::Committed,
            ReleaseStage::Push => PipelineState::Pushed,
            ReleaseStage::Tag => PipelineState::Tagged,
            ReleaseStage::PushTag => PipelineState::TagPushed,
        }
    }
}

impl fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Linear pipeline state. `TagPushed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Bumped,
    Committed,
    Pushed,
    Tagged,
    TagPushed,
    Failed(ReleaseStage),
}

impl PipelineState {
    /// The stage to run from this state, `None` once terminal
    pub fn next_stage(&self) -> Option<ReleaseStage> {
        match self {
            PipelineState::Start => Some(ReleaseStage::Bump),
            PipelineState::Bumped => Some(ReleaseStage::Commit),
            PipelineState::Committed => Some(ReleaseStage::Push),
            PipelineState::Pushed => Some(ReleaseStage::Tag),
            PipelineState::Tagged => Some(ReleaseStage::PushTag),
            PipelineState::TagPushed | PipelineState::Failed(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_stage().is_none()
    }
}
