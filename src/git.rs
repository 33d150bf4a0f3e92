//! # Git Module
//!
//! Resolves the current branch by asking the `git` executable, bounded by a
//! short timeout. Failure of any kind resolves to [`BranchState::Unresolved`];
//! a successful query with empty output means detached HEAD.

use crate::models::git::BranchState;
use crate::process::{run_bounded, ExternalCommand};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(1);

pub fn branch_command(dir: Option<&Path>) -> ExternalCommand {
    let cmd = ExternalCommand::new("git", &["branch", "--show-current"]);
    match dir {
        Some(d) => cmd.in_dir(d),
        None => cmd,
    }
}

/// Classify the captured stdout of a branch query.
pub fn branch_from_output(output: Option<&str>) -> BranchState {
    match output.map(str::trim) {
        None => BranchState::Unresolved,
        Some("") => BranchState::Detached,
        Some(name) => BranchState::Named(name.to_string()),
    }
}

/// Query the branch checked out in `dir`, or the process working directory.
pub fn resolve_branch(dir: Option<&Path>, timeout: Duration) -> BranchState {
    resolve_with(&branch_command(dir), timeout)
}

pub fn resolve_with(command: &ExternalCommand, timeout: Duration) -> BranchState {
    branch_from_output(run_bounded(command, timeout).as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_output() {
        assert_eq!(branch_from_output(None), BranchState::Unresolved);
        assert_eq!(branch_from_output(Some("")), BranchState::Detached);
        assert_eq!(branch_from_output(Some("  \n")), BranchState::Detached);
        assert_eq!(
            branch_from_output(Some("feature/login\n")),
            BranchState::Named("feature/login".to_string())
        );
    }

    #[test]
    fn builds_show_current_command() {
        let cmd = branch_command(Some(Path::new("/tmp")));
        assert_eq!(cmd.program, "git");
        assert_eq!(cmd.args, vec!["branch", "--show-current"]);
        assert_eq!(cmd.current_dir.as_deref(), Some(Path::new("/tmp")));
        assert!(branch_command(None).current_dir.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn command_outcomes_map_to_states() {
        let t = Duration::from_millis(1500);
        assert_eq!(
            resolve_with(&ExternalCommand::new("true", &[]), t),
            BranchState::Detached
        );
        assert_eq!(
            resolve_with(&ExternalCommand::new("false", &[]), t),
            BranchState::Unresolved
        );
        assert_eq!(
            resolve_with(&ExternalCommand::new("echo", &["main"]), t),
            BranchState::Named("main".to_string())
        );
        assert_eq!(
            resolve_with(&ExternalCommand::new("sleep", &["5"]), Duration::from_millis(100)),
            BranchState::Unresolved
        );
    }

    #[cfg(unix)]
    fn git(dir: &Path, args: &[&str]) -> bool {
        std::process::Command::new("git")
            .args(["-c", "user.name=statusline", "-c", "user.email=statusline@localhost"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .current_dir(dir)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[cfg(unix)]
    #[test]
    fn real_repository_named_then_detached() {
        let dir = tempfile::tempdir().unwrap();
        if !git(dir.path(), &["--version"]) {
            eprintln!("git not installed; skipping");
            return;
        }
        assert!(git(dir.path(), &["init", "-q"]));
        assert!(git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/trunk"]));
        assert!(git(dir.path(), &["commit", "-q", "--allow-empty", "-m", "init"]));

        let t = Duration::from_secs(5);
        assert_eq!(
            resolve_branch(Some(dir.path()), t),
            BranchState::Named("trunk".to_string())
        );

        assert!(git(dir.path(), &["checkout", "-q", "--detach"]));
        assert_eq!(resolve_branch(Some(dir.path()), t), BranchState::Detached);
    }

    #[cfg(unix)]
    #[test]
    fn outside_a_repository_is_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let ceiling = dir.path().parent().unwrap_or(dir.path());
        // Keep git from discovering a repository above the temp dir.
        let ceiling_var = format!("GIT_CEILING_DIRECTORIES={}", ceiling.display());
        let fenced = ExternalCommand::new(
            "env",
            &[ceiling_var.as_str(), "git", "branch", "--show-current"],
        )
        .in_dir(dir.path());
        assert_eq!(resolve_with(&fenced, Duration::from_secs(5)), BranchState::Unresolved);
    }
}
