//! Time-bounded external commands.
//!
//! [`run_bounded`] never returns an error: spawn failures, non-zero exits,
//! timeouts and unreadable output all collapse to `None`. The child is
//! killed and reaped on every path.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Cap on captured stdout.
const MAX_OUTPUT_SIZE: u64 = 64 * 1024;

/// How long to wait for the reader thread once the child has exited.
/// Only a grandchild still holding the pipe open can exhaust it.
const OUTPUT_COLLECTION_GRACE: Duration = Duration::from_millis(250);

/// Program, arguments and working directory of an external query.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            current_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Kills and reaps the child when dropped, unless it already exited.
struct ReapOnDrop(Child);

impl Drop for ReapOnDrop {
    fn drop(&mut self) {
        if let Ok(None) = self.0.try_wait() {
            let _ = self.0.kill();
        }
        let _ = self.0.wait();
    }
}

/// Run `command`, returning its stdout if it exits successfully within
/// `timeout`.
pub fn run_bounded(command: &ExternalCommand, timeout: Duration) -> Option<String> {
    let mut child = ReapOnDrop(command.to_command().spawn().ok()?);

    // Drain stdout while waiting so a full pipe cannot stall the child.
    let stdout = child.0.stdout.take()?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = stdout.take(MAX_OUTPUT_SIZE).read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });

    let status = child.0.wait_timeout(timeout).ok()??;
    if !status.success() {
        return None;
    }
    let bytes = rx.recv_timeout(OUTPUT_COLLECTION_GRACE).ok()?.ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
