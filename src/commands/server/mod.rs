//! Local server and process commands
//!
//! Socket and process tables come from `lsof` and `ps`; both are parsed
//! here so the commands only deal with typed rows.

pub mod find;
pub mod kill;
pub mod ports;

use crate::registry::CommandRegistry;
use crate::runner::{run_program, Context};
use anyhow::Context as _;
use regex::Regex;

/// One socket row from `lsof -nP -i`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketEntry {
    pub command: String,
    pub pid: u32,
    pub protocol: String,
    pub local_port: u16,
    /// TCP state such as `LISTEN`; `None` for UDP
    pub state: Option<String>,
}

/// One row from `ps`
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub cpu: f32,
    pub memory: f32,
    pub status: String,
    pub name: String,
}

/// Parse `lsof -nP -i` output, skipping the header and anything unparsable
pub fn parse_lsof(output: &str) -> Vec<SocketEntry> {
    let row = Regex::new(
        r"^(?P<cmd>.+?)\s+(?P<pid>\d+)\s+.*?\s(?P<proto>TCP|UDP)\s+(?P<local>\S+?)(?:->\S+)?(?:\s+\((?P<state>[A-Z_]+)\))?\s*$",
    )
    .expect("valid lsof pattern");

    output
        .lines()
        .filter_map(|line| {
            let caps = row.captures(line)?;
            let local = &caps["local"];
            let local_port = local.rsplit(':').next()?.parse().ok()?;
            Some(SocketEntry {
                command: caps["cmd"].trim().replace("\\x20", " "),
                pid: caps["pid"].parse().ok()?,
                protocol: caps["proto"].to_string(),
                local_port,
                state: caps.name("state").map(|m| m.as_str().to_string()),
            })
        })
        .collect()
}

/// Human name for the first letter of a `ps` STAT field
pub fn status_name(stat: &str) -> &'static str {
    match stat.chars().next() {
        Some('R') => "running",
        Some('S') => "sleeping",
        Some('D') => "disk-sleep",
        Some('T') => "stopped",
        Some('t') => "tracing-stop",
        Some('Z') => "zombie",
        Some('I') => "idle",
        Some('X') => "dead",
        _ => "unknown",
    }
}

/// Parse `ps -eo pid=,pcpu=,pmem=,stat=,comm=` output
pub fn parse_ps(output: &str) -> Vec<ProcessInfo> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let pid = fields.next()?.parse().ok()?;
            let cpu = fields.next()?.parse().ok()?;
            let memory = fields.next()?.parse().ok()?;
            let stat = fields.next()?;
            let comm = fields.collect::<Vec<_>>().join(" ");
            if comm.is_empty() {
                return None;
            }
            let name = comm.rsplit('/').next().unwrap_or(&comm).to_string();
            Some(ProcessInfo {
                pid,
                cpu,
                memory,
                status: status_name(stat).to_string(),
                name,
            })
        })
        .collect()
}

/// Open sockets matching the extra `lsof` selection arguments
pub(crate) fn sockets(ctx: &Context, selection: &[&str]) -> anyhow::Result<Vec<SocketEntry>> {
    let mut args = vec!["+c", "0", "-nP"];
    args.extend_from_slice(selection);
    // lsof exits 1 when nothing matches, so only a spawn failure is an error
    let output = run_program("lsof", &args, ctx).context("Failed to run lsof (is it installed?)")?;
    Ok(parse_lsof(&output.stdout))
}

/// Every process visible to `ps`
pub(crate) fn processes(ctx: &Context) -> anyhow::Result<Vec<ProcessInfo>> {
    let output = run_program("ps", &["-eo", "pid=,pcpu=,pmem=,stat=,comm="], ctx)
        .context("Failed to run ps")?;
    Ok(parse_ps(&output.stdout))
}

/// Distinct pids with a socket bound locally to `port`, in first-seen order
pub fn pids_on_port(entries: &[SocketEntry], port: u16) -> Vec<u32> {
    let mut pids = Vec::new();
    for entry in entries.iter().filter(|e| e.local_port == port) {
        if !pids.contains(&entry.pid) {
            pids.push(entry.pid);
        }
    }
    pids
}

/// Register every `server:*` command
pub fn register_all(registry: &mut CommandRegistry) {
    kill::register(registry);
    find::register(registry);
    ports::register(registry);
}
