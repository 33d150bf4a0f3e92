/// Label shown when git succeeds but reports no branch (detached HEAD).
pub const BRANCH_SENTINEL: &str = "HEAD";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BranchState {
    Named(String),
    Detached,
    #[default]
    Unresolved,
}

impl BranchState {
    /// Text for the branch fragment; `None` drops the fragment entirely.
    pub fn label(&self) -> Option<&str> {
        match self {
            BranchState::Named(name) => Some(name),
            BranchState::Detached => Some(BRANCH_SENTINEL),
            BranchState::Unresolved => None,
        }
    }
}
