//! External process execution
//!
//! Handlers shell out to `git`, `lsof`, `ping` and friends through these
//! helpers so that working directory and verbose tracing stay consistent.

use crate::runner::Context;
use std::io;
use std::process::{Command as StdCommand, Output, Stdio};

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Trimmed stdout
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    fn from_output(output: Output) -> Self {
        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        }
    }
}

/// Run a program directly with arguments, capturing its output
pub fn run_program(program: &str, args: &[&str], ctx: &Context) -> io::Result<CommandOutput> {
    ctx.print_debug(&format!("[RUN] {} {}", program, args.join(" ")));

    let output = StdCommand::new(program)
        .args(args)
        .current_dir(&ctx.working_dir)
        .stdin(Stdio::null())
        .output()?;

    Ok(CommandOutput::from_output(output))
}

/// Run a shell command string through the context interpreter, capturing output
pub fn run_captured(cmd_str: &str, ctx: &Context) -> io::Result<CommandOutput> {
    ctx.print_debug(&format!("[RUN] {}", cmd_str));

    let output = shell_command(cmd_str, ctx).stdin(Stdio::null()).output()?;

    Ok(CommandOutput::from_output(output))
}

/// Run a program with inherited stdio; returns whether it exited successfully
pub fn run_inherited(program: &str, args: &[&str], ctx: &Context) -> io::Result<bool> {
    ctx.print_debug(&format!("[RUN] {} {}", program, args.join(" ")));

    let status = StdCommand::new(program)
        .args(args)
        .current_dir(&ctx.working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    Ok(status.success())
}

/// Check if a shell command succeeds, discarding its output
pub fn check_command(cmd_str: &str, ctx: &Context) -> io::Result<bool> {
    let status = shell_command(cmd_str, ctx)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    Ok(status.success())
}

fn shell_command(cmd_str: &str, ctx: &Context) -> StdCommand {
    let mut command = StdCommand::new(&ctx.interpreter[0]);

    // Add interpreter args (e.g., "-c" for sh/bash)
    if ctx.interpreter.len() > 1 {
        command.args(&ctx.interpreter[1..]);
    }

    command.arg(cmd_str);
    command.current_dir(&ctx.working_dir);
    command
}
