//! Infracurate CLI - Curate INFRA transaction exports into upload workbooks
//!
//! # Main Commands
//!
//! ```bash
//! infracurate convert export.xlsx         # Convert to the upload workbook
//! infracurate convert export.xlsx -o out.xlsx
//! infracurate inspect export.xlsx         # Show sheets, rows, headers
//! ```

use clap::{Parser, Subcommand};
use infracurate::{convert_file, read_source_workbook, ConvertOptions, HeaderConvention};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "infracurate")]
#[command(about = "Curate INFRA transaction exports into upload workbooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full conversion: source workbook to the seven-sheet upload workbook
    Convert {
        /// Input xlsx file with Sheet1 (transactions) and Sheet2 (tranches)
        input: PathBuf,

        /// Output file (default: <input>_Destination_<timestamp>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write provisional names on the reserved Transaction columns
        /// instead of blank headers
        #[arg(long)]
        provisional_headers: bool,
    },

    /// Show sheet names, row counts and headers without converting
    Inspect {
        /// Input xlsx file
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            provisional_headers,
        } => cmd_convert(&input, output.as_deref(), provisional_headers),

        Commands::Inspect { input } => cmd_inspect(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    provisional_headers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };

    let options = ConvertOptions {
        headers: if provisional_headers {
            HeaderConvention::Provisional
        } else {
            HeaderConvention::Blank
        },
    };

    eprintln!("Converting: {}", input.display());
    let summary = convert_file(input, &output, &options)?;

    eprintln!("   Transactions:    {}", summary.transactions);
    eprintln!("   Events:          {}", summary.events);
    eprintln!("   Bidders:         {}", summary.bidders);
    eprintln!("   Tranches:        {}", summary.tranches);
    eprintln!("   Pricings:        {}", summary.tranche_pricings);
    eprintln!("   Tranche roles:   {}", summary.tranche_roles);
    eprintln!("Wrote: {}", output.display());
    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (sheet1, sheet2) = read_source_workbook(input)?;

    eprintln!("Workbook: {}", input.display());
    for (name, table) in [("Sheet1", &sheet1), ("Sheet2", &sheet2)] {
        eprintln!("   {}: {} rows, {} columns", name, table.len(), table.columns().len());
        eprintln!("      {}", table.columns().join(", "));
    }
    Ok(())
}

/// `<stem>_Destination_<YYYYmmdd_HHMMSS>.xlsx` next to the input file.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    input.with_file_name(format!("{}_Destination_{}.xlsx", stem, timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("/data/export.xlsx"));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("export_Destination_"));
        assert!(name.ends_with(".xlsx"));
        assert_eq!(path.parent(), Some(Path::new("/data")));
    }
}
