//! `ip:list` - local interface addresses

use crate::commands::ip::address_type;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::runner::{run_program, Context};
use crate::ui::Table;
use colored::Color;
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, UdpSocket};

const USAGE: &str = "ip:list";

/// Any routable address works; nothing is sent over a UDP connect
const ROUTE_PROBE: &str = "8.8.8.8:80";

/// An address bound to a named interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    pub interface: String,
    pub ip: IpAddr,
}

/// Which tool produced the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    Ifconfig,
    IpAddr,
}

/// Extract non-loopback addresses from `ifconfig` or `ip addr show` output
pub fn parse_interfaces(output: &str, format: ListingFormat) -> Vec<InterfaceAddress> {
    let header = match format {
        ListingFormat::Ifconfig => Regex::new(r"^([^\s:]+)"),
        ListingFormat::IpAddr => Regex::new(r"^\d+:\s*([^:@\s]+)"),
    }
    .expect("valid interface pattern");
    let inet = Regex::new(r"\binet\s+(?:addr:)?(\d+\.\d+\.\d+\.\d+)").expect("valid inet pattern");
    let inet6 = Regex::new(r"\binet6\s+(?:addr:\s*)?([0-9a-fA-F:]+)").expect("valid inet6 pattern");

    let mut current: Option<String> = None;
    let mut found = Vec::new();

    for line in output.lines() {
        let starts_block = match format {
            ListingFormat::Ifconfig => !line.is_empty() && !line.starts_with(char::is_whitespace),
            ListingFormat::IpAddr => line.starts_with(|c: char| c.is_ascii_digit()),
        };
        if starts_block {
            if let Some(caps) = header.captures(line) {
                current = Some(caps[1].to_string());
            }
        }
        let Some(interface) = &current else {
            continue;
        };

        let ip = if let Some(caps) = inet.captures(line) {
            caps[1].parse::<Ipv4Addr>().ok().map(IpAddr::V4)
        } else if let Some(caps) = inet6.captures(line) {
            caps[1].parse::<Ipv6Addr>().ok().map(IpAddr::V6)
        } else {
            None
        };

        if let Some(ip) = ip.filter(|ip| !ip.is_loopback()) {
            found.push(InterfaceAddress {
                interface: interface.clone(),
                ip,
            });
        }
    }
    found
}

/// The local address the OS would route outbound traffic from
fn primary_address() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect(ROUTE_PROBE).ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

fn interface_addresses(ctx: &Context) -> Vec<InterfaceAddress> {
    let attempts = [
        ("ifconfig", &[][..], ListingFormat::Ifconfig),
        ("ip", &["addr", "show"][..], ListingFormat::IpAddr),
    ];
    for (program, args, format) in attempts {
        match run_program(program, args, ctx) {
            Ok(output) if output.success() => return parse_interfaces(&output.stdout, format),
            Ok(_) => continue,
            Err(e) => ctx.print_debug(&format!("{} unavailable: {}", program, e)),
        }
    }
    ctx.print_warning("Could not get interface details");
    Vec::new()
}

pub struct ListCommand;

impl CommandHandler for ListCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let mut table = Table::new("Local IP Addresses")
            .colored_column("Interface", Color::Cyan)
            .colored_column("IP Address", Color::Green)
            .colored_column("Type", Color::Yellow);

        if let Some(ip) = primary_address() {
            table.add_row(["Primary".to_string(), ip.to_string(), "IPv4 (Local)".to_string()]);
        }
        for entry in interface_addresses(ctx) {
            table.add_row([entry.interface, entry.ip.to_string(), address_type(entry.ip)]);
        }
        table.add_row(["Localhost", "127.0.0.1", "IPv4 (Loopback)"]);
        table.add_row(["Localhost", "::1", "IPv6 (Loopback)"]);

        ctx.print_output(&table.render());
        Ok(true)
    }
}

/// Register the list command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("list", "Show local IP addresses", ListCommand)
            .in_category("ip")
            .with_usage(USAGE),
    );
}
