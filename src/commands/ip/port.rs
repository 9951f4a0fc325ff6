//! `ip:port` - TCP connect check against a host

use crate::commands::ip::parse_port;
use crate::commands::missing_argument;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::ui::HelpPage;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

const USAGE: &str = "ip:port <port> [host]";

const DEFAULT_HOST: &str = "localhost";

/// Outcome of a port probe
#[derive(Debug, PartialEq, Eq)]
pub enum PortState {
    Open,
    Closed,
    Unresolved,
}

/// Try every resolved address of `host` until one accepts a connection
pub fn probe(host: &str, port: u16, timeout: Duration) -> PortState {
    let addrs: Vec<SocketAddr> = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs.collect(),
        Err(_) => return PortState::Unresolved,
    };
    if addrs.is_empty() {
        return PortState::Unresolved;
    }
    let open = addrs
        .iter()
        .any(|addr| TcpStream::connect_timeout(addr, timeout).is_ok());
    if open {
        PortState::Open
    } else {
        PortState::Closed
    }
}

pub struct PortCommand;

impl CommandHandler for PortCommand {
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
        let host = inv.arg(1).unwrap_or(DEFAULT_HOST);
        let timeout = Duration::from_secs(ctx.settings.port_timeout_secs);

        ctx.print_debug(&format!("Connecting to {}:{} ({}s timeout)", host, port, timeout.as_secs()));
        match probe(host, port, timeout) {
            PortState::Open => {
                ctx.print_success(&format!("Port {} is open on {}", port, host));
                Ok(true)
            }
            PortState::Closed => {
                ctx.print_error(&format!("Port {} is closed on {}", port, host));
                Ok(false)
            }
            PortState::Unresolved => {
                ctx.print_error(&format!("Could not resolve hostname: {}", host));
                Ok(false)
            }
        }
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl PortCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Check if a port is open on localhost or specified host")
            .action("<port>", "Port number to check (1-65535)")
            .action("<port> <host>", "Check port on specific host (default: localhost)")
    }
}

/// Register the port command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("port", "Check if port is open", PortCommand)
            .in_category("ip")
            .with_usage(USAGE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_probe_open_and_closed() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        assert_eq!(probe("127.0.0.1", port, Duration::from_secs(2)), PortState::Open);

        drop(listener);
        assert_eq!(probe("127.0.0.1", port, Duration::from_secs(2)), PortState::Closed);
    }

    #[test]
    fn test_probe_unresolved() {
        assert_eq!(
            probe("no-such-host.invalid", 80, Duration::from_secs(1)),
            PortState::Unresolved
        );
    }
}
