use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use csv_cli::app;
use csv_cli::codec;
use csv_cli::json_export;
use csv_cli::table;
use csv_cli::ui;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file path
    file: Option<PathBuf>,

    /// Export the table to JSON and output to stdout (for piping)
    #[arg(long, short = 'j', requires = "file")]
    json_export: bool,

    /// Write the JSON export to a file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH", requires = "json_export")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never corrupt the terminal UI or a piped
    // JSON export
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() && !cli.json_export {
        eprintln!("csv-cli error: Pipe detected but -j or --json-export flag not provided.");
        std::process::exit(1);
    }

    // If JSON export flag is set, convert the file and exit
    if cli.json_export {
        let Some(path) = cli.file else {
            anyhow::bail!("--json-export requires a CSV file path");
        };

        let decoded = codec::decode_file(&path)?;

        match cli.output {
            Some(output) => json_export::export_rows_json(&decoded.rows, &output)?,
            None => {
                let json_string = json_export::serialize_to_json(&decoded.rows)?;
                println!("{}", json_string);
            }
        }

        return Ok(());
    }

    // Otherwise, run the interactive UI. The file, when given, is decoded
    // on a worker thread while the grid is already up.
    let mut app_state = app::AppState::new(table::Table::new());
    if let Some(path) = cli.file {
        app_state.request_load(path);
    }

    ui::run_app(app_state)?;

    Ok(())
}
