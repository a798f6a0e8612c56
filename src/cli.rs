use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use printcost_calc::PrintCostCalculator;
use printcost_core::{CostRequest, PrinterRegistry};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;

use crate::report;

/// 互動模式預設的印表機設定檔
pub const DEFAULT_PRINTERS_FILE: &str = "printers.txt";

#[derive(Parser, Debug)]
#[command(author, version, about = "3D print cost calculator")]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "warn"
    )]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Menu-driven session (default)
    Interactive {
        /// File used by the export/import menu entries
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_PRINTERS_FILE)]
        printers_file: PathBuf,
        /// Load printers from this file before the menu starts
        #[arg(long, value_name = "FILE")]
        preload: Option<PathBuf>,
        /// JSON file the export/import entries also use for the printing parameters
        #[arg(short = 'c', long, value_name = "FILE")]
        params: Option<PathBuf>,
    },
    /// One-shot calculation from files
    Calculate {
        /// Printer list, one `nickname,kW,h/unit,nozzle,capacity` line each
        #[arg(short, long, value_name = "FILE")]
        printers: PathBuf,
        /// Job parameters as JSON
        #[arg(short = 'c', long, value_name = "FILE")]
        params: Option<PathBuf>,
        /// Overrides `total_units` from the parameter file
        #[arg(short, long)]
        units: Option<u32>,
        /// Print the result as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    pub fn interactive_default() -> Self {
        Command::Interactive {
            printers_file: PathBuf::from(DEFAULT_PRINTERS_FILE),
            preload: None,
            params: None,
        }
    }
}

/// 讀取印表機檔案，略過的行記錄為警告
pub fn load_registry(path: &Path) -> Result<PrinterRegistry> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read printer file {:?}", path))?;

    let mut registry = PrinterRegistry::new();
    let report = registry.import(&text);
    for rejected in &report.rejected {
        warn!(
            "略過 {:?} 第 {} 行: {}",
            path, rejected.line_number, rejected.error
        );
    }
    info!("已載入 {} 台印表機", report.accepted_count());

    Ok(registry)
}

/// 執行一次性計算，返回要輸出的文字
pub fn calculate(
    printers: &Path,
    params: Option<&Path>,
    units: Option<u32>,
    json: bool,
) -> Result<String> {
    let registry = load_registry(printers)?;

    let mut request = match params {
        None => {
            warn!("未提供參數檔，使用預設值（成本皆為 0）");
            CostRequest::default()
        }
        Some(path) => CostRequest::from_json_file(path)
            .with_context(|| format!("incorrect parameter file {:?}", path))?,
    };
    if let Some(units) = units {
        request = request.with_total_units(units);
    }

    let result = PrintCostCalculator::new(&registry).calculate(&request)?;

    if json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        Ok(report::render(&result))
    }
}
