//! `changetrack completions <shell>` - print a completion script, or where
//! to install one.

use std::io;

use clap::Command;
use clap_complete::Shell;
use colored::Colorize;
use serde::Serialize;

use crate::output::{Output, OutputFormat, TableDisplay};

const BIN_NAME: &str = "changetrack";

/// How to wire the generated script into a shell.
#[derive(Debug, Serialize)]
pub struct CompletionSetup {
    pub shell: String,
    /// Line for the shell's startup file.
    pub startup_line: String,
    /// Startup file the line belongs to.
    pub startup_file: &'static str,
}

impl CompletionSetup {
    fn for_shell(shell: Shell) -> Self {
        let script = format!("{BIN_NAME} completions {shell}");
        let (startup_line, startup_file) = match shell {
            Shell::Fish => (format!("{script} | source"), "~/.config/fish/config.fish"),
            Shell::PowerShell => (
                format!("{script} | Out-String | Invoke-Expression"),
                "$PROFILE",
            ),
            Shell::Elvish => (format!("eval ({script} | slurp)"), "~/.config/elvish/rc.elv"),
            Shell::Zsh => (format!("source <({script})"), "~/.zshrc"),
            _ => (format!("source <({script})"), "~/.bashrc"),
        };
        Self {
            shell: shell.to_string(),
            startup_line,
            startup_file,
        }
    }
}

impl TableDisplay for CompletionSetup {
    fn to_table(&self) -> String {
        format!(
            "{} {}\n  {}\n",
            "Add to".cyan().bold(),
            self.startup_file.yellow(),
            self.startup_line
        )
    }

    fn to_markdown(&self) -> String {
        format!(
            "Add to `{}` ({}):\n\n```\n{}\n```",
            self.startup_file, self.shell, self.startup_line
        )
    }
}

pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn io::Write) {
    clap_complete::generate(shell, cmd, BIN_NAME, out);
}

pub fn run_instructions(shell: Shell, format: OutputFormat) -> anyhow::Result<()> {
    Output::new(CompletionSetup::for_shell(shell), format).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_line_sources_the_script() {
        let zsh = CompletionSetup::for_shell(Shell::Zsh);
        assert_eq!(zsh.startup_line, "source <(changetrack completions zsh)");
        assert_eq!(zsh.startup_file, "~/.zshrc");

        let fish = CompletionSetup::for_shell(Shell::Fish);
        assert_eq!(fish.startup_line, "changetrack completions fish | source");

        let powershell = CompletionSetup::for_shell(Shell::PowerShell);
        assert!(powershell.startup_line.starts_with("changetrack completions powershell"));
    }

    #[test]
    fn test_script_covers_subcommands() {
        let mut cmd = Command::new(BIN_NAME)
            .subcommand(Command::new("compare"))
            .subcommand(Command::new("completions"));
        let mut out = Vec::new();
        generate_completions(Shell::Bash, &mut cmd, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("compare"));
        assert!(script.contains("completions"));
    }

    #[test]
    fn test_markdown_names_the_startup_file() {
        let markdown = CompletionSetup::for_shell(Shell::Bash).to_markdown();
        assert!(markdown.starts_with("Add to `~/.bashrc` (bash)"));
        assert!(markdown.contains("source <(changetrack completions bash)"));
    }
}
