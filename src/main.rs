//! # cmakegen CLI Entry Point
//!
//! Parses CLI arguments using clap and routes commands to the handlers in
//! [`cmakegen::commands`].
//!
//! - `generate` - write a CMakeLists.txt from the invocation log
//! - `clear` - empty the invocation log
//! - `show` - list the recorded invocations
//! - `completion` - shell completion scripts

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use cmakegen::commands;

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

#[cfg(windows)]
fn enable_windows_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_windows_utf8_console() {}

#[derive(Parser)]
#[command(name = "cmakegen")]
#[command(about = "Generate CMakeLists.txt from intercepted build commands", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CMakeLists.txt from the invocation log
    Generate {
        /// Path to the invocation log file
        #[arg(long)]
        log: Option<PathBuf>,
        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print a summary of the synthesized target to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Clear the invocation log
    Clear {
        /// Path to the invocation log file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// List the recorded invocations
    Show {
        /// Path to the invocation log file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    enable_windows_utf8_console();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            log,
            output,
            verbose,
        } => commands::generate::handle_generate(&commands::generate::GenerateOptions {
            log,
            output,
            verbose,
        }),
        Commands::Clear { log } => commands::log::handle_clear(log.as_deref()),
        Commands::Show { log } => commands::log::handle_show(log.as_deref()),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}
