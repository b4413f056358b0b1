//! MCP Config Generator CLI
//!
//! Reads an mcp.json, writes the .cursor copy and the approvals list.
//! Returns non-zero on any parse, validation, or I/O failure.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use mcpgen_core::generator;

#[derive(Parser)]
#[command(name = "mcpgen-cli")]
#[command(about = "Generate .cursor MCP config and approval hashes from an mcp.json")]
struct Cli {
    /// Path to input mcp.json file
    #[arg(short, long)]
    file: PathBuf,

    /// Output directory where the .cursor folder will be created
    #[arg(short, long)]
    out: PathBuf,
}

fn main() -> ExitCode {
    // Help and version print to stdout and exit 0; usage errors (unknown
    // flag, missing value) exit 1, not clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };

    match generator::generate(&cli.file, &cli.out) {
        Ok(files) => {
            println!("✓ Generated MCP configuration files:");
            println!("  {}", files.config_path.display());
            println!("  {}", files.approvals_path.display());
            println!();
            println!("To use with Docker:");
            println!("  docker run --rm \\");
            println!("    -e CURSOR_API_KEY=your_key \\");
            println!("    -v $(pwd)/{}/.cursor:/root/.cursor \\", cli.out.display());
            println!("    ghcr.io/circlesac/docker-cursor-agent:latest \\");
            println!("    --print --output-format stream-json \"your prompt\"");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
