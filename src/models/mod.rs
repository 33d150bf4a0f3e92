pub mod git;
pub mod input;
pub mod usage;

pub use git::{BranchState, BRANCH_SENTINEL};
pub use input::{InvalidJson, StatusInput};
pub use usage::{Severity, UsageSnapshot};
