use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::warn;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use texide::core::config;
use texide::tui;

#[derive(Parser)]
#[command(name = "texide", about = "Terminal LaTeX editor with remote compilation")]
struct Args {
    /// LaTeX file to edit (created on first save if missing)
    file: Option<PathBuf>,

    /// Compile server base URL (overrides config and TEXIDE_SERVER_URL)
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to texide.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("texide.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        config::TexideConfig::default()
    });
    let resolved = config::resolve(&file_config, args.server.as_deref());

    log::info!(
        "Texide starting up against {}{}",
        resolved.server_url,
        resolved.compile_path
    );

    tui::run(resolved, args.file)
}
