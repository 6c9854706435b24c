//! # Columna CLI
//!
//! Command-line interface for rendering receipt tickets to ESC/POS bytes.
//!
//! ## Usage
//!
//! ```bash
//! # Render a JSON ticket and show the bytes as hex
//! columna render ticket.json
//!
//! # Render and send to a network printer
//! columna render ticket.json --device 192.168.1.50:9100
//!
//! # List demo receipts, then print one on 58mm paper over Bluetooth
//! columna demo
//! columna demo full --paper 58 --device bt:/dev/rfcomm0
//!
//! # Show line budgets per paper and font scale
//! columna budget
//!
//! # Query the paper sensor of a USB printer
//! columna status --device usb:/dev/usb/lp0 --kind paper
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use columna::{
    ColumnaError,
    document::TicketDocument,
    job::PrintJob,
    layout::{LayoutConfig, TrailingColumns},
    printer::{FontScale, PaperSpec, line_budget},
    protocol::{Codepage, commands::StatusKind, set_default_codepage},
    receipt,
    transport::{ByteChannel, Endpoint, query_status, send_job},
};

/// Columna - receipt layout for ESC/POS thermal printers
#[derive(Parser, Debug)]
#[command(name = "columna")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Codepage used when a ticket does not name one
    #[arg(long, global = true, value_parser = Codepage::from_name)]
    codepage: Option<Codepage>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a JSON ticket document
    Render {
        /// Ticket document path
        file: PathBuf,

        #[command(flatten)]
        output: Output,
    },

    /// Render a built-in demo receipt (omit the name to list them)
    Demo {
        name: Option<String>,

        /// Paper width: 58/narrow or 80/wide
        #[arg(long, default_value = "80", value_parser = PaperSpec::parse)]
        paper: PaperSpec,

        /// Keep wrapped columns inside their own width on continuation lines
        #[arg(long)]
        reserve_trailing: bool,

        #[command(flatten)]
        output: Output,
    },

    /// Print the line budget table
    Budget,

    /// Query a real-time status byte from a printer
    Status {
        /// Printer endpoint (tcp:HOST[:PORT], HOST:PORT, bt:PATH, usb:PATH)
        #[arg(long)]
        device: Endpoint,

        /// printer, offline, error or paper
        #[arg(long, default_value = "printer", value_parser = parse_status_kind)]
        kind: StatusKind,
    },
}

/// Where rendered bytes go. Hex on stdout unless a file or device is given.
#[derive(Args, Debug)]
struct Output {
    /// Write raw bytes to a file
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Send to a printer endpoint (tcp:HOST[:PORT], HOST:PORT, bt:PATH, usb:PATH)
    #[arg(long)]
    device: Option<Endpoint>,

    /// Also print a hex dump when writing to a file or device
    #[arg(long)]
    hex: bool,
}

fn parse_status_kind(s: &str) -> Result<StatusKind, String> {
    match s.to_ascii_lowercase().as_str() {
        "printer" => Ok(StatusKind::Printer),
        "offline" => Ok(StatusKind::Offline),
        "error" => Ok(StatusKind::Error),
        "paper" => Ok(StatusKind::PaperSensor),
        _ => Err(format!("unknown status kind '{s}'")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ColumnaError> {
    let cli = Cli::parse();

    if let Some(codepage) = cli.codepage {
        set_default_codepage(codepage);
    }

    match cli.command {
        Commands::Render { file, output } => {
            let json = fs::read_to_string(&file)?;
            let document = TicketDocument::from_json(&json)?;
            let job = document.render()?;
            info!(file = %file.display(), buffers = job.len(), bytes = job.byte_len(), "rendered ticket");
            emit(&job, &output)?;
        }

        Commands::Demo {
            name,
            paper,
            reserve_trailing,
            output,
        } => {
            let Some(name) = name else {
                println!("Available receipts:");
                for name in receipt::list_receipts() {
                    println!("  {}", name);
                }
                return Ok(());
            };

            let mut config = LayoutConfig::new(paper);
            if reserve_trailing {
                config = config.with_trailing_columns(TrailingColumns::Reserve);
            }
            let job = receipt::by_name(&name, config, Local::now().naive_local())
                .ok_or_else(|| ColumnaError::UnknownReceipt(name.clone()))??;
            info!(receipt = %name, paper = %paper, bytes = job.byte_len(), "rendered demo receipt");
            emit(&job, &output)?;
        }

        Commands::Budget => {
            println!("{:<8} {:>8} {:>8}", "paper", "normal", "double");
            for paper in [PaperSpec::Narrow, PaperSpec::Wide] {
                println!(
                    "{:<8} {:>8} {:>8}",
                    paper.to_string(),
                    line_budget(paper, FontScale::Normal),
                    line_budget(paper, FontScale::Double),
                );
            }
        }

        Commands::Status { device, kind } => {
            let mut channel = device.channel();
            channel.open()?;
            let status = query_status(channel.as_mut(), kind);
            channel.close()?;
            let status = status?;
            println!("{}: 0x{:02X} ({:08b})", device, status, status);
        }
    }

    Ok(())
}

/// Deliver `job` according to `output`.
fn emit(job: &PrintJob, output: &Output) -> Result<(), ColumnaError> {
    let bytes = job.to_bytes();

    if let Some(path) = &output.out {
        fs::write(path, &bytes)?;
        println!("Wrote {} bytes to {}", bytes.len(), path.display());
    }

    if let Some(endpoint) = &output.device {
        let mut channel = endpoint.channel();
        channel.open()?;
        let sent = send_job(channel.as_mut(), job);
        channel.close()?;
        println!("Sent {} bytes to {}", sent?, endpoint);
    }

    if output.hex || (output.out.is_none() && output.device.is_none()) {
        print!("{}", hex_dump(&bytes));
    }
    Ok(())
}

/// 16 bytes per line: offset, hex, printable ASCII.
fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        out.push_str(&format!("{:08X}  {:<47}  {}\n", i * 16, hex.join(" "), ascii));
    }
    out
}
