//! Synthesized help pages
//!
//! Commands describe their actions as data and this module turns them into
//! a uniform help screen. Rendering never fails; missing pieces are left out.

use colored::Colorize;

/// One action line in a help page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpAction {
    pub name: String,
    pub args: Option<String>,
    pub description: Option<String>,
}

/// Help content for a command with sub-actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpPage {
    /// Usage template, e.g. `env:path [show|add|remove|clean] [path]`
    pub usage: String,
    pub actions: Vec<HelpAction>,
    pub summary: Option<String>,
}

impl HelpPage {
    pub fn new(usage: impl Into<String>) -> Self {
        HelpPage {
            usage: usage.into(),
            ..Self::default()
        }
    }

    /// Set the one-line summary shown above the usage line
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Add an action without arguments
    pub fn action(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.actions.push(HelpAction {
            name: name.into(),
            args: None,
            description: Some(description.into()),
        });
        self
    }

    /// Add an action that takes arguments
    pub fn action_with_args(
        mut self,
        name: impl Into<String>,
        args: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.actions.push(HelpAction {
            name: name.into(),
            args: Some(args.into()),
            description: Some(description.into()),
        });
        self
    }

    /// Title derived from the first word of the usage template
    pub fn title(&self) -> String {
        format!("Help: {}", self.usage.split_whitespace().next().unwrap_or(""))
    }

    /// Render the page for a tool invoked as `tool`
    pub fn render(&self, tool: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n\n", self.title().bold().blue()));

        if let Some(summary) = self.summary.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("{} {}\n\n", "Description:".bold(), summary));
        }

        out.push_str(&format!(
            "{} {}\n",
            "Usage:".bold(),
            format!("{} {}", tool, self.usage).trim_end().cyan()
        ));

        if !self.actions.is_empty() {
            out.push_str(&format!("\n{}\n", "Available Actions:".bold()));
            for action in &self.actions {
                let head = match action.args.as_deref().filter(|a| !a.is_empty()) {
                    Some(args) => format!("  {} {}", action.name, args),
                    None => format!("  {}", action.name),
                };
                match action.description.as_deref().filter(|d| !d.is_empty()) {
                    Some(desc) => out.push_str(&format!("{} - {}\n", head.cyan(), desc)),
                    None => out.push_str(&format!("{}\n", head.cyan())),
                }
            }
        }

        out.trim_end().to_string()
    }
}
