//! strbuf CLI
//!
//! Demonstrates the strbuf string builder.
//!
//! # Commands
//!
//! - `demo` - Build a short string with every append kind and print it (default)
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// strbuf string builder demonstration.
#[derive(Parser)]
#[command(name = "strbuf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build "wat!" plus a sum line and print it
    Demo {
        /// Left operand of the sum line
        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        lhs: i64,

        /// Right operand of the sum line
        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        rhs: i64,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the built string
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Demo {
        lhs: 2,
        rhs: 2,
        format: "text".to_string(),
    }) {
        Commands::Demo { lhs, rhs, format } => {
            commands::demo::run(lhs, rhs, &format)?;
        }
        Commands::Version => {
            println!("strbuf CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("strbuf core v{}", strbuf_core::VERSION);
        }
    }

    Ok(())
}
