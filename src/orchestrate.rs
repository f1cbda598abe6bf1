//! Wrappers for the external `orchestrate` CLI
//!
//! Every importer step is one invocation of the orchestrate binary. Argv is
//! fully materialized up front; nothing goes through a shell.

use crate::error::PipelineError;
use std::path::Path;
use tracing::debug;

/// Result type for command operations
type Result<T> = std::result::Result<T, PipelineError>;

/// One invocation of the orchestrate binary
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestrateCommand {
    /// Human-readable step description
    pub description: String,
    /// Arguments passed to the binary, in order
    pub args: Vec<String>,
}

/// Captured result of a completed invocation
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutcome {
    /// Outcome for a command that could not be spawned at all.
    ///
    /// Exit code 127 matches what a shell reports for a missing binary, so
    /// keep-going runs treat "binary not found" like any other failed step.
    pub fn spawn_failure(command: String, err: &std::io::Error) -> Self {
        Self {
            command,
            exit_code: 127,
            stdout: String::new(),
            stderr: err.to_string(),
            success: false,
        }
    }
}

impl OrchestrateCommand {
    fn new(description: &str, args: &[&str]) -> Self {
        Self {
            description: description.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `tools remove -n` - removes every registered tool without confirmation
    pub fn tools_remove_all() -> Self {
        Self::new("remove previously registered tools", &["tools", "remove", "-n"])
    }

    /// `connections remove -a <app>`
    pub fn connections_remove(app: &str) -> Self {
        Self::new(
            &format!("remove existing connections for '{}'", app),
            &["connections", "remove", "-a", app],
        )
    }

    /// `connections add -a <app>`
    pub fn connections_add(app: &str) -> Self {
        Self::new(
            &format!("add connection '{}'", app),
            &["connections", "add", "-a", app],
        )
    }

    /// `connections configure -a <app> --env <env> -t <type> -k <kind>`
    pub fn connections_configure(app: &str, env: &str, auth_type: &str, auth_kind: &str) -> Self {
        Self::new(
            &format!("configure connection '{}' for {}", app, env),
            &[
                "connections",
                "configure",
                "-a",
                app,
                "--env",
                env,
                "-t",
                auth_type,
                "-k",
                auth_kind,
            ],
        )
    }

    /// `tools import -k <kind> -f <tool-file> -r <requirements> -a <app>`
    pub fn tools_import(kind: &str, tool_file: &Path, requirements: &Path, app: &str) -> Self {
        let tool_file = tool_file.to_string_lossy();
        let requirements = requirements.to_string_lossy();
        Self::new(
            &format!("import tool '{}'", app),
            &[
                "tools",
                "import",
                "-k",
                kind,
                "-f",
                &tool_file,
                "-r",
                &requirements,
                "-a",
                app,
            ],
        )
    }

    /// Render the full command line for display
    pub fn render(&self, bin: &Path) -> String {
        format!("{} {}", bin.display(), self.args.join(" "))
    }

    /// Run the command to completion, capturing output
    pub async fn run(&self, bin: &Path) -> Result<CommandOutcome> {
        let rendered = self.render(bin);
        debug!("Executing: {}", rendered);

        let output = tokio::process::Command::new(bin)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| PipelineError::Spawn {
                command: rendered.clone(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        let success = output.status.success();

        // Pass the CLI's own output through to the terminal
        if !stdout.is_empty() {
            print!("{}", stdout);
        }
        if !stderr.is_empty() {
            eprint!("{}", stderr);
        }

        if !success {
            eprintln!("\n⚠️  Command exited with code {}", exit_code);
        }

        Ok(CommandOutcome {
            command: rendered,
            exit_code,
            stdout,
            stderr,
            success,
        })
    }
}
