//! Command-line argument parsing for wxo-import

use clap::Parser;
use std::path::PathBuf;

/// wxo-import - register a connection and import a tool into watsonx Orchestrate
#[derive(Parser, Debug)]
#[command(name = "wxo-import")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// App name for the connection and the imported tool
    #[arg(short = 'a', long, value_name = "NAME", env = "WXO_IMPORT_APP_NAME")]
    pub app_name: Option<String>,

    /// Python tool source file
    #[arg(short = 'f', long, value_name = "FILE", env = "WXO_IMPORT_TOOL_FILE")]
    pub tool_file: Option<PathBuf>,

    /// Requirements manifest for the tool
    #[arg(short = 'r', long, value_name = "FILE", env = "WXO_IMPORT_REQUIREMENTS")]
    pub requirements: Option<PathBuf>,

    /// Environment to configure (repeat for more than one)
    #[arg(short = 'e', long = "env", value_name = "ENV")]
    pub environments: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the orchestrate binary
    #[arg(long, value_name = "PATH", env = "WXO_IMPORT_ORCHESTRATE_BIN")]
    pub orchestrate_bin: Option<PathBuf>,

    /// Run remaining steps even after a step fails
    #[arg(long)]
    pub keep_going: bool,

    /// Skip the initial tool purge (which removes every registered tool, not just this app's)
    #[arg(long)]
    pub no_purge: bool,

    /// Print the command plan without invoking anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}
