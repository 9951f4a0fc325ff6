//! `project:license` - write a LICENSE file from a built-in template

use crate::commands::project::templates::{self, LicenseTemplate, LICENSES};
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::runner::{run_program, Context};
use crate::ui::HelpPage;
use anyhow::Context as _;
use chrono::{Datelike, Local};
use colored::Colorize;
use std::env;
use std::fs;

const USAGE: &str = "project:license [license_identifier]";

const LICENSE_FILE: &str = "LICENSE";

const FALLBACK_HOLDER: &str = "The Authors";

/// Copyright holder: git `user.name`, then `$USER`, then a placeholder
fn copyright_holder(ctx: &Context) -> String {
    run_program("git", &["config", "user.name"], ctx)
        .ok()
        .filter(|out| out.success())
        .map(|out| out.stdout_trimmed().to_string())
        .filter(|name| !name.is_empty())
        .or_else(|| env::var("USER").ok().filter(|u| !u.is_empty()))
        .unwrap_or_else(|| FALLBACK_HOLDER.to_string())
}

fn choose_template(inv: &Invocation<'_>) -> Option<&'static LicenseTemplate> {
    if let Some(template) = inv.arg(0).and_then(templates::find) {
        return Some(template);
    }

    let ctx = inv.ctx;
    if let Some(unknown) = inv.arg(0) {
        ctx.print_warning(&format!("Unknown license '{}'", unknown));
    }
    ctx.print_info("Available licenses:");
    for license in LICENSES {
        ctx.print_output(&format!("  {} - {}", license.identifier.cyan(), license.name));
    }

    let answer = ctx.prompt("Select a license")?;
    let template = templates::find(&answer);
    if template.is_none() {
        ctx.print_error(&format!("License type '{}' not found", answer));
    }
    template
}

pub struct LicenseCommand;

impl CommandHandler for LicenseCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let Some(template) = choose_template(inv) else {
            return Ok(false);
        };

        let path = ctx.working_dir.join(LICENSE_FILE);
        if path.exists() && !ctx.confirm("LICENSE file already exists. Overwrite?") {
            ctx.print_info("License creation cancelled");
            return Ok(true);
        }

        let holder = copyright_holder(ctx);
        let content = template.render(Local::now().year(), &holder);
        fs::write(&path, content)
            .with_context(|| format!("Failed to create license file {}", path.display()))?;

        ctx.print_success(&format!("Created {} in {} file", template.name, LICENSE_FILE));
        ctx.print_debug(&format!("Copyright holder: {}", holder));
        Ok(true)
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl LicenseCommand {
    fn help_page(&self) -> HelpPage {
        LICENSES.iter().fold(
            HelpPage::new(USAGE).summary("Create a license file for your project"),
            |page, license| page.action(license.identifier, license.name),
        )
    }
}

/// Register the license command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("license", "Create a license file for your project", LicenseCommand)
            .in_category("project")
            .with_usage(USAGE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Verbosity;
    use tempfile::TempDir;

    fn run_in(dir: &TempDir, args: &[&str]) -> bool {
        let ctx = Context::new()
            .with_verbosity(Verbosity::Silent)
            .with_assume_yes(true)
            .with_working_dir(dir.path().to_path_buf());
        let registry = CommandRegistry::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let inv = Invocation {
            key: "project:license",
            args: &args,
            ctx: &ctx,
            registry: &registry,
        };
        LicenseCommand.execute(&inv).unwrap()
    }

    #[test]
    fn test_writes_selected_license() {
        let dir = TempDir::new().unwrap();
        assert!(run_in(&dir, &["isc"]));

        let text = fs::read_to_string(dir.path().join("LICENSE")).unwrap();
        assert!(text.starts_with("ISC License"));
        assert!(text.contains(&Local::now().year().to_string()));
    }

    #[test]
    fn test_writes_apache_and_gpl() {
        let dir = TempDir::new().unwrap();
        assert!(run_in(&dir, &["apache"]));
        let text = fs::read_to_string(dir.path().join("LICENSE")).unwrap();
        assert!(text.trim_start().starts_with("Apache License"));
        assert!(text.contains("Version 2.0, January 2004"));

        assert!(run_in(&dir, &["gpl"]));
        let text = fs::read_to_string(dir.path().join("LICENSE")).unwrap();
        assert!(text.trim_start().starts_with("GNU GENERAL PUBLIC LICENSE"));
        assert!(text.contains("Version 3, 29 June 2007"));
    }

    #[test]
    fn test_overwrites_with_yes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("LICENSE"), "old").unwrap();
        assert!(run_in(&dir, &["unlicense"]));

        let text = fs::read_to_string(dir.path().join("LICENSE")).unwrap();
        assert!(text.starts_with("This is free and unencumbered software"));
    }

    #[test]
    fn test_help_page_lists_templates() {
        let page = LicenseCommand.help_page();
        assert_eq!(page.actions.len(), LICENSES.len());
        assert_eq!(page.actions[0].name, "mit");
    }
}
