//! `ip:subnet` - network, broadcast, masks and host range of a CIDR block

use crate::commands::missing_argument;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::ui::{HelpPage, Table};
use anyhow::{anyhow, bail};
use colored::Color;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

const USAGE: &str = "ip:subnet <ip/cidr>";

/// A CIDR block; host bits of the parsed address are cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    network: u128,
    prefix: u32,
    v6: bool,
}

impl Subnet {
    /// Parse `addr/prefix` or a bare address (a single-address block)
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let (addr, prefix) = match text.trim().split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (text.trim(), None),
        };
        let ip: IpAddr = addr
            .parse()
            .map_err(|_| anyhow!("'{}' does not appear to be an IPv4 or IPv6 address", addr))?;

        let v6 = ip.is_ipv6();
        let bits = if v6 { 128 } else { 32 };
        let prefix = match prefix {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| anyhow!("'{}' is not a valid netmask", raw))?,
            None => bits,
        };
        if prefix > bits {
            bail!("'{}' is not a valid netmask", prefix);
        }

        let value = match ip {
            IpAddr::V4(v4) => u32::from(v4) as u128,
            IpAddr::V6(v6) => u128::from(v6),
        };
        let subnet = Subnet {
            network: 0,
            prefix,
            v6,
        };
        Ok(Subnet {
            network: value & subnet.netmask_bits(),
            ..subnet
        })
    }

    fn bits(&self) -> u32 {
        if self.v6 {
            128
        } else {
            32
        }
    }

    fn hostmask_bits(&self) -> u128 {
        let host_bits = self.bits() - self.prefix;
        if host_bits == 0 {
            0
        } else {
            u128::MAX >> (128 - host_bits)
        }
    }

    fn netmask_bits(&self) -> u128 {
        let full = if self.v6 { u128::MAX } else { u32::MAX as u128 };
        full & !self.hostmask_bits()
    }

    fn address(&self, value: u128) -> IpAddr {
        if self.v6 {
            IpAddr::V6(Ipv6Addr::from(value))
        } else {
            IpAddr::V4(Ipv4Addr::from(value as u32))
        }
    }

    pub fn prefix(&self) -> u32 {
        self.prefix
    }

    pub fn network_address(&self) -> IpAddr {
        self.address(self.network)
    }

    /// Last address of the block
    pub fn broadcast_address(&self) -> IpAddr {
        self.address(self.network | self.hostmask_bits())
    }

    pub fn netmask(&self) -> IpAddr {
        self.address(self.netmask_bits())
    }

    pub fn hostmask(&self) -> IpAddr {
        self.address(self.hostmask_bits())
    }

    /// Addresses in the block, saturating at `u128::MAX` for `::/0`
    pub fn num_addresses(&self) -> u128 {
        self.hostmask_bits().saturating_add(1)
    }

    /// Usable hosts; blocks of one or two addresses count every address
    pub fn num_hosts(&self) -> u128 {
        if self.bits() - self.prefix >= 2 {
            self.num_addresses() - 2
        } else {
            self.num_addresses()
        }
    }

    pub fn first_host(&self) -> IpAddr {
        if self.bits() - self.prefix >= 2 {
            self.address(self.network + 1)
        } else {
            self.network_address()
        }
    }

    pub fn last_host(&self) -> IpAddr {
        let broadcast = self.network | self.hostmask_bits();
        if self.bits() - self.prefix >= 2 {
            self.address(broadcast - 1)
        } else {
            self.address(broadcast)
        }
    }

    /// `(property, value)` rows in display order
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Network Address", self.network_address().to_string()),
            ("Broadcast Address", self.broadcast_address().to_string()),
            ("Netmask", self.netmask().to_string()),
            ("Host Mask", self.hostmask().to_string()),
            ("Number of Hosts", self.num_hosts().to_string()),
            ("First Host", self.first_host().to_string()),
            ("Last Host", self.last_host().to_string()),
            ("CIDR Notation", self.to_string()),
        ]
    }
}

impl std::fmt::Display for Subnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network_address(), self.prefix)
    }
}

pub struct SubnetCommand;

impl CommandHandler for SubnetCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let Some(raw) = inv.arg(0) else {
            return Ok(missing_argument(inv, "IP/CIDR", &self.help_page()));
        };

        let subnet = match Subnet::parse(raw) {
            Ok(subnet) => subnet,
            Err(e) => {
                ctx.print_error(&format!("Invalid network format: {}", e));
                return Ok(false);
            }
        };

        let mut table = Table::new(format!("Subnet Information: {}", subnet))
            .colored_column("Property", Color::Cyan)
            .colored_column("Value", Color::Green);
        for (property, value) in subnet.properties() {
            table.add_row([property.to_string(), value]);
        }
        ctx.print_output(&table.render());
        Ok(true)
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl SubnetCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Get detailed subnet information for an IP/CIDR block")
            .action(
                "<ip/cidr>",
                "IP address with CIDR notation (e.g., 192.168.1.0/24)",
            )
    }
}

/// Register the subnet command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("subnet", "Get subnet information for IP/CIDR", SubnetCommand)
            .in_category("ip")
            .with_usage(USAGE),
    );
}
