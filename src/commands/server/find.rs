//! `server:find` - processes by name or by the port they hold

use crate::commands::missing_argument;
use crate::commands::server::{pids_on_port, processes, sockets, ProcessInfo, SocketEntry};
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::ui::{HelpPage, Table};
use colored::Color;

const USAGE: &str = "server:find <name_or_port>";

const MAX_RESULTS: usize = 32;

const MAX_PORTS_SHOWN: usize = 5;

/// Processes matching `term`: holders of the port when it is numeric,
/// then case-insensitive name matches, without duplicates
pub fn search<'p>(
    term: &str,
    procs: &'p [ProcessInfo],
    sockets: &[SocketEntry],
) -> Vec<&'p ProcessInfo> {
    let mut found: Vec<&ProcessInfo> = Vec::new();

    if !term.is_empty() && term.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(port) = term.parse::<u16>() {
            for pid in pids_on_port(sockets, port) {
                found.extend(procs.iter().filter(|p| p.pid == pid));
            }
        }
    }

    let needle = term.to_lowercase();
    found.extend(procs.iter().filter(|p| p.name.to_lowercase().contains(&needle)));

    let mut seen = Vec::new();
    found.retain(|p| {
        if seen.contains(&p.pid) {
            false
        } else {
            seen.push(p.pid);
            true
        }
    });
    found
}

/// Comma-separated local ports for a pid, `-` when it has none
pub fn ports_for(pid: u32, sockets: &[SocketEntry]) -> String {
    let mut ports: Vec<u16> = Vec::new();
    for entry in sockets.iter().filter(|e| e.pid == pid) {
        if !ports.contains(&entry.local_port) {
            ports.push(entry.local_port);
        }
    }
    if ports.is_empty() {
        return "-".to_string();
    }
    let shown: Vec<String> = ports.iter().take(MAX_PORTS_SHOWN).map(u16::to_string).collect();
    let mut text = shown.join(", ");
    if ports.len() > MAX_PORTS_SHOWN {
        text.push_str("...");
    }
    text
}

pub struct FindCommand;

impl CommandHandler for FindCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let Some(term) = inv.arg(0) else {
            return Ok(missing_argument(inv, "Search term", &self.help_page()));
        };

        ctx.print_info(&format!("Searching for processes matching '{}'...", term));
        let procs = processes(ctx)?;
        let open = sockets(ctx, &["-i"])?;
        let found = search(term, &procs, &open);

        if found.is_empty() {
            ctx.print_warning(&format!("No processes found matching '{}'", term));
            return Ok(true);
        }

        let mut table = Table::new(format!("Processes matching '{}'", term))
            .colored_column("PID", Color::Cyan)
            .colored_column("Name", Color::Green)
            .colored_column("CPU%", Color::Yellow)
            .colored_column("Memory%", Color::Red)
            .colored_column("Status", Color::Blue)
            .colored_column("Ports", Color::Magenta);
        for process in found.iter().take(MAX_RESULTS) {
            table.add_row([
                process.pid.to_string(),
                process.name.clone(),
                format!("{:.1}%", process.cpu),
                format!("{:.1}%", process.memory),
                process.status.clone(),
                ports_for(process.pid, &open),
            ]);
        }
        ctx.print_output(&table.render());
        Ok(true)
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl FindCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Find processes by name or port number")
            .action("<name_or_port>", "Process name or port number to search for")
    }
}

/// Register the find command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("find", "Find processes by name or port", FindCommand)
            .in_category("server")
            .with_usage(USAGE),
    );
}
