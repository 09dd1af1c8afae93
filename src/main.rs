use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use devrank::aggregate::aggregate;
use devrank::catalog::CatalogParser;
use devrank::config::{Config, Format};
use devrank::error::DevrankError;
use devrank::report::{self, Report};

#[derive(Parser)]
#[command(name = "devrank")]
#[command(about = "Ranks device families by install count", version)]
struct Cli {
    /// Device catalog export (brand,name,code,model rows)
    catalog: PathBuf,

    /// Install-log export (device code in column 3, installs in column 10)
    log: PathBuf,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Maximum ranked rows to print (0 = all)
    #[arg(long)]
    limit: Option<usize>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load();
    let format = cli.format.unwrap_or(config.report.format);
    let limit = cli.limit.unwrap_or(config.report.limit);

    let raw_catalog = read_input(&cli.catalog)?;
    let raw_log = read_input(&cli.log)?;

    let parser = CatalogParser::new()?;
    let catalog = parser.parse(&raw_catalog);

    if cli.verbose {
        println!(
            "Parsed {} devices in {} families from {}",
            catalog.devices_by_code.len().to_string().cyan(),
            catalog.families.len().to_string().cyan(),
            cli.catalog.display()
        );
    }

    let result = aggregate(&raw_log, catalog);
    let mut report = Report::build(&result);
    if limit > 0 {
        report.rows.truncate(limit);
    }

    match format {
        Format::Json => println!("{}", report::to_json(&report)?),
        Format::Table => report::print_table(&report),
    }

    Ok(())
}

// Trim surrounding whitespace so an all-whitespace file takes the
// empty-input short-circuit instead of parsing blank rows.
fn read_input(path: &Path) -> devrank::error::Result<String> {
    let raw = fs::read_to_string(path).map_err(|source| DevrankError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    Ok(raw.trim().to_string())
}
