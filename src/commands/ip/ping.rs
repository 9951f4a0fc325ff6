//! `ip:ping` - run the system ping with a packet count

use crate::commands::missing_argument;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::runner::run_inherited;
use crate::ui::HelpPage;
use anyhow::Context as _;

const USAGE: &str = "ip:ping <host> [count]";

pub struct PingCommand;

/// Packet count from the argument, or `None` when it is not a positive integer
pub fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|count| *count > 0)
}

impl CommandHandler for PingCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let Some(host) = inv.arg(0) else {
            return Ok(missing_argument(inv, "Host", &self.help_page()));
        };

        let default_count = ctx.settings.ping_count;
        let count = match inv.arg(1) {
            Some(raw) => parse_count(raw).unwrap_or_else(|| {
                ctx.print_warning(&format!(
                    "Invalid count '{}', using default: {}",
                    raw, default_count
                ));
                default_count
            }),
            None => default_count,
        };

        ctx.print_info(&format!("Pinging {} with {} packets...", host, count));
        let count = count.to_string();
        let ok = run_inherited("ping", &["-c", count.as_str(), host], ctx)
            .context("Failed to run ping (is it installed?)")?;

        if ok {
            ctx.print_success(&format!("Ping to {} successful", host));
        } else {
            ctx.print_error(&format!("Ping to {} failed", host));
        }
        Ok(ok)
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl PingCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Ping a host with configurable packet count")
            .action("<host>", "Host to ping (IP address or hostname)")
            .action("<host> <count>", "Host to ping with custom packet count")
    }
}

/// Register the ping command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("ping", "Ping a host", PingCommand)
            .in_category("ip")
            .with_usage(USAGE),
    );
}
