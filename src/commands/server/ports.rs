//! `server:ports` - every listening TCP port and its owner

use crate::commands::server::{sockets, SocketEntry};
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::ui::Table;
use colored::Color;
use std::collections::BTreeMap;

const USAGE: &str = "server:ports";

const LISTEN: &str = "LISTEN";

/// First listening socket seen for each port, ordered by port
pub fn listening_ports(entries: &[SocketEntry]) -> BTreeMap<u16, &SocketEntry> {
    let mut ports = BTreeMap::new();
    for entry in entries {
        if entry.state.as_deref() == Some(LISTEN) {
            ports.entry(entry.local_port).or_insert(entry);
        }
    }
    ports
}

pub struct PortsCommand;

impl CommandHandler for PortsCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        ctx.print_info("Scanning for listening ports...");

        let entries = sockets(ctx, &["-iTCP", "-sTCP:LISTEN"])?;
        let ports = listening_ports(&entries);

        let mut table = Table::new("Listening Ports")
            .colored_column("Port", Color::Cyan)
            .colored_column("Protocol", Color::Green)
            .colored_column("Process", Color::Yellow)
            .colored_column("PID", Color::Red)
            .colored_column("Status", Color::Blue);
        for (port, entry) in &ports {
            table.add_row([
                port.to_string(),
                entry.protocol.clone(),
                entry.command.clone(),
                entry.pid.to_string(),
                LISTEN.to_string(),
            ]);
        }

        ctx.print_output(&table.render());
        ctx.print_success(&format!("Found {} listening ports", ports.len()));
        Ok(true)
    }
}

/// Register the ports command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("ports", "List all listening ports", PortsCommand)
            .in_category("server")
            .with_usage(USAGE),
    );
}
