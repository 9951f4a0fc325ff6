//! `server:kill` - terminate whatever holds a port

use crate::commands::ip::parse_port;
use crate::commands::missing_argument;
use crate::commands::server::{pids_on_port, processes, sockets};
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::runner::{run_program, Context};
use crate::ui::HelpPage;
use std::thread;
use std::time::{Duration, Instant};

const USAGE: &str = "server:kill <port>";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How a process went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    Terminated,
    ForceKilled,
    Failed,
}

fn signal(pid: u32, sig: &str, ctx: &Context) -> bool {
    let pid = pid.to_string();
    run_program("kill", &[sig, pid.as_str()], ctx)
        .map(|out| out.success())
        .unwrap_or(false)
}

fn is_alive(pid: u32, ctx: &Context) -> bool {
    signal(pid, "-0", ctx)
}

/// SIGTERM, wait up to `grace`, then SIGKILL
pub fn terminate(pid: u32, grace: Duration, ctx: &Context) -> KillOutcome {
    if !signal(pid, "-TERM", ctx) {
        return KillOutcome::Failed;
    }

    let deadline = Instant::now() + grace;
    while Instant::now() < deadline {
        if !is_alive(pid, ctx) {
            return KillOutcome::Terminated;
        }
        thread::sleep(POLL_INTERVAL);
    }

    ctx.print_warning(&format!("Process {} didn't terminate, force killing...", pid));
    if signal(pid, "-KILL", ctx) {
        KillOutcome::ForceKilled
    } else if !is_alive(pid, ctx) {
        KillOutcome::Terminated
    } else {
        KillOutcome::Failed
    }
}

pub struct KillCommand;

impl CommandHandler for KillCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let Some(raw) = inv.arg(0) else {
            return Ok(missing_argument(inv, "Port number", &self.help_page()));
        };
        let port = match parse_port(raw) {
            Ok(port) => port,
            Err(message) => {
                ctx.print_error(&message);
                return Ok(false);
            }
        };

        ctx.print_info(&format!("Looking for process on port {}...", port));
        let selection = format!("-i:{}", port);
        let pids = pids_on_port(&sockets(ctx, &[selection.as_str()])?, port);
        if pids.is_empty() {
            ctx.print_warning(&format!("No process found running on port {}", port));
            return Ok(true);
        }

        let procs = processes(ctx)?;
        let grace = Duration::from_secs(ctx.settings.kill_grace_secs);
        let mut all_ok = true;

        for pid in pids {
            let name = procs
                .iter()
                .find(|p| p.pid == pid)
                .map(|p| p.name.as_str())
                .unwrap_or("unknown");
            ctx.print_info(&format!("Found process: {} (PID: {})", name, pid));

            match terminate(pid, grace, ctx) {
                KillOutcome::Terminated => {
                    ctx.print_success(&format!("Successfully killed process {}", pid))
                }
                KillOutcome::ForceKilled => {
                    ctx.print_success(&format!("Force killed process {}", pid))
                }
                KillOutcome::Failed => {
                    ctx.print_error(&format!("Killing process {} failed (permission denied?)", pid));
                    all_ok = false;
                }
            }
        }
        Ok(all_ok)
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl KillCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Kill processes running on the specified port")
            .action("<port>", "Port number to kill processes on")
    }
}

/// Register the kill command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("kill", "Kill process running on specified port", KillCommand)
            .in_category("server")
            .with_usage(USAGE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Verbosity;
    use std::process::Command;

    #[test]
    fn test_terminate_sleeping_child() {
        let ctx = Context::new().with_verbosity(Verbosity::Silent);
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();

        let outcome = terminate(child.id(), Duration::from_secs(1), &ctx);
        let status = child.wait().unwrap();
        assert_ne!(outcome, KillOutcome::Failed);
        assert!(!status.success());
    }
}
