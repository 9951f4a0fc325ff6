//! `ip:validate` - check an IPv4 or IPv6 address and report its scope

use crate::commands::ip::{classify, AddressScope};
use crate::commands::missing_argument;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::ui::HelpPage;
use std::net::IpAddr;

const USAGE: &str = "ip:validate <ip_address>";

pub struct ValidateCommand;

/// Sentence describing the scope of a valid address
pub fn describe_scope(ip: IpAddr) -> String {
    let scope = classify(ip);
    let kind = match (scope, ip) {
        (AddressScope::Public, IpAddr::V6(_)) => "global".to_string(),
        (scope, _) => scope.to_string().to_lowercase(),
    };
    let family = if ip.is_ipv4() { "IP" } else { "IPv6" };
    format!("This is a {} {} address", kind, family)
}

impl CommandHandler for ValidateCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let Some(raw) = inv.arg(0) else {
            return Ok(missing_argument(inv, "IP address", &self.help_page()));
        };

        match raw.parse::<IpAddr>() {
            Ok(ip) => {
                let family = if ip.is_ipv4() { "IPv4" } else { "IPv6" };
                ctx.print_success(&format!("Valid {} address: {}", family, raw));
                ctx.print_info(&describe_scope(ip));
                Ok(true)
            }
            Err(_) => {
                ctx.print_error(&format!("Invalid IP address: {}", raw));
                Ok(false)
            }
        }
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl ValidateCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Validate if a string is a valid IP address (IPv4 or IPv6)")
            .action("<ip_address>", "IPv4 or IPv6 address to validate")
    }
}

/// Register the validate command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("validate", "Validate IP address format", ValidateCommand)
            .in_category("ip")
            .with_usage(USAGE),
    );
}
