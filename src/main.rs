use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use context_statusline::cli::Args;
use context_statusline::display::{
    build_json_error, build_json_output, compose_line, error_line, Painter,
};
use context_statusline::models::{BranchState, InvalidJson, StatusInput};
use context_statusline::usage::calc_usage;
use context_statusline::utils::{load_env_file, read_stdin};

fn main() {
    let env_file = load_env_file();
    let args = Args::parse();
    let painter = Painter::from_env();
    let started = Instant::now();

    // The host's prompt depends on us: always print one line, always exit 0.
    if !args.debug {
        panic::set_hook(Box::new(|_| {}));
    }
    let rendered = panic::catch_unwind(AssertUnwindSafe(|| render(&args, &painter)))
        .unwrap_or_else(|payload| Err(anyhow!(panic_message(payload.as_ref()))));
    let line = match rendered {
        Ok(line) => line,
        Err(e) => {
            let message = if e.downcast_ref::<InvalidJson>().is_some() {
                InvalidJson.to_string()
            } else {
                format!("{e:#}")
            };
            if args.json {
                build_json_error(&message).to_string()
            } else {
                error_line(&painter, &message)
            }
        }
    };

    let mut out = std::io::stdout().lock();
    let _ = writeln!(out, "{line}");
    let _ = out.flush();

    if args.debug {
        eprintln!();
        eprintln!("=== Debug Information ===");
        eprintln!("Env file: {:?}", env_file);
        eprintln!("Args: {:?}", args);
        eprintln!("Elapsed: {:?}", started.elapsed());
        eprintln!("========================");
    }
}

fn render(args: &Args, painter: &Painter) -> Result<String> {
    let stdin = read_stdin().context("read stdin")?;
    let input = StatusInput::parse(&stdin)?;
    let usage = calc_usage(&input);
    let branch = if args.no_git {
        BranchState::Unresolved
    } else {
        resolve_branch(&input, args)
    };

    if args.debug {
        eprintln!(
            "usage: pct={} remaining={} severity={} window={}",
            usage.used_percentage,
            usage.remaining_tokens,
            usage.severity.as_str(),
            input.context_window_size()
        );
        eprintln!("branch: {:?}", branch);
    }

    let model = input.model_name();
    if args.json {
        Ok(build_json_output(model, &usage, &branch).to_string())
    } else {
        compose_line(painter, model, &usage, &branch, args.bar_width)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "internal error".to_string()
    }
}

// Run git in the workspace the host reports, falling back to our own cwd.
#[cfg(feature = "git")]
fn resolve_branch(input: &StatusInput, args: &Args) -> BranchState {
    let dir = input
        .current_dir()
        .map(std::path::Path::new)
        .filter(|p| p.is_dir());
    context_statusline::git::resolve_branch(dir, args.git_timeout())
}

#[cfg(not(feature = "git"))]
fn resolve_branch(_input: &StatusInput, _args: &Args) -> BranchState {
    BranchState::Unresolved
}
