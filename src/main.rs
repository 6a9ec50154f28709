use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use ticketfront::export::{Exporter, FsSink, LogNotifier};
use ticketfront::page::{Page, TICKET_ELEMENT_ID};
use ticketfront::ticket::TicketView;
use ticketfront::{ExportConfig, RegistrationResult};

#[derive(Parser)]
#[command(name = "ticketfront", about = "Registration-site ticket export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a registration record as a PDF ticket
    Export {
        /// Path to the registration record (JSON)
        #[arg(long)]
        input: PathBuf,
        /// Output directory for the PDF
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Device-pixel scale of the ticket raster
        #[arg(long, default_value_t = 2.0)]
        scale: f32,
        /// Element id the ticket view is mounted under
        #[arg(long, default_value = TICKET_ELEMENT_ID)]
        element_id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Export { input, out, scale, element_id } => {
            let raw = std::fs::read_to_string(&input)?;
            let data: RegistrationResult = serde_json::from_str(&raw)?;

            let mut page = Page::new();
            page.mount(element_id.clone(), TicketView::from_registration(&data));

            let mut config = ExportConfig::default();
            config.raster.scale = scale;

            let mut exporter = Exporter::new(
                page,
                ticketfront::new_rasterizer(),
                Box::new(FsSink::new(&out)),
                Arc::new(LogNotifier),
                config,
            );
            exporter.export_ticket(&element_id, &data.registration_id)?;
            println!(
                "{}",
                out.join(ticketfront::export::ticket_filename(&data.registration_id))
                    .display()
            );
        }
    }
    Ok(())
}
