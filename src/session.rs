//! 互動式工作階段
//!
//! 選單流程對任意 `BufRead`/`Write` 運作，方便以記憶體輸入測試。

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use printcost_calc::PrintCostCalculator;
use printcost_core::config::{parse_count, parse_decimal};
use printcost_core::{CostRequest, Printer, PrinterRegistry};
use rust_decimal::Decimal;

use crate::cli::DEFAULT_PRINTERS_FILE;
use crate::report;

/// 互動式工作階段（擁有註冊表與目前的工作參數）
pub struct Session<R, W> {
    input: R,
    output: W,
    registry: PrinterRegistry,
    request: CostRequest,
    printers_file: PathBuf,
    /// 設定時，匯出/匯入一併保存工作參數（JSON）
    params_file: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            registry: PrinterRegistry::new(),
            request: CostRequest::default(),
            printers_file: PathBuf::from(DEFAULT_PRINTERS_FILE),
            params_file: None,
        }
    }

    /// 建構器模式：設置匯出/匯入檔案
    pub fn with_printers_file(mut self, path: PathBuf) -> Self {
        self.printers_file = path;
        self
    }

    /// 建構器模式：設置工作參數檔案
    pub fn with_params_file(mut self, path: PathBuf) -> Self {
        self.params_file = Some(path);
        self
    }

    /// 建構器模式：設置初始工作參數
    pub fn with_request(mut self, request: CostRequest) -> Self {
        self.request = request;
        self
    }

    /// 建構器模式：設置初始註冊表
    pub fn with_registry(mut self, registry: PrinterRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &PrinterRegistry {
        &self.registry
    }

    pub fn request(&self) -> &CostRequest {
        &self.request
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 主選單迴圈，選擇離開或輸入結束時返回
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n3D Print Cost Calculator")?;
            writeln!(self.output, "1. Set Printing Parameters")?;
            writeln!(self.output, "2. Manage Printers")?;
            writeln!(self.output, "3. Calculate Costs")?;
            writeln!(self.output, "4. Export Printers")?;
            writeln!(self.output, "5. Import Printers")?;
            writeln!(self.output, "6. Exit")?;

            let Some(choice) = self.read_line("Select an option: ")? else {
                return Ok(());
            };

            match choice.trim().parse::<u32>() {
                Ok(1) => self.request = self.collect_inputs()?,
                Ok(2) => self.manage_printers()?,
                Ok(3) => self.calculate_costs()?,
                Ok(4) => self.export_printers()?,
                Ok(5) => self.import_printers()?,
                Ok(6) => return Ok(()),
                Ok(_) => writeln!(self.output, "Invalid option. Try again.")?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    /// 詢問工作參數
    ///
    /// 折扣以百分比輸入，存為比例。
    pub fn collect_inputs(&mut self) -> Result<CostRequest> {
        let total_units = self.prompt_count("Enter the number of units to print: ")?;
        let material_per_unit = self.prompt_decimal("Enter material required per unit (grams): ")?;
        let commission_per_unit = self.prompt_decimal("Enter commission per unit ($): ")?;
        let material_cost_per_kg = self.prompt_decimal("Enter material cost per Kg ($): ")?;

        let answer = self.prompt("Does the supplier provide a discount? (yes/no): ")?;
        let has_discount = answer.trim().eq_ignore_ascii_case("yes");
        let discount_rate = if has_discount {
            self.prompt_decimal("Enter discount percentage: ")? / Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let energy_cost_per_kwh = self.prompt_decimal("Enter energy cost per kWh ($): ")?;

        Ok(CostRequest {
            total_units,
            material_per_unit,
            material_cost_per_kg,
            has_discount,
            discount_rate,
            energy_cost_per_kwh,
            commission_per_unit,
        })
    }

    fn manage_printers(&mut self) -> Result<()> {
        writeln!(self.output, "\n1. Add Printer")?;
        writeln!(self.output, "2. List Printers")?;
        writeln!(self.output, "3. Remove Printer")?;
        writeln!(self.output, "4. Back")?;

        let choice = self.prompt("Select an option: ")?;
        match choice.trim().parse::<u32>() {
            Ok(1) => self.add_printer(),
            Ok(2) => {
                let listing = report::render_printers(&self.registry);
                write!(self.output, "{}", listing)?;
                Ok(())
            }
            Ok(3) => self.remove_printer(),
            Ok(4) => Ok(()),
            Ok(_) => {
                writeln!(self.output, "Invalid option.")?;
                Ok(())
            }
            Err(_) => {
                writeln!(self.output, "Please enter a valid number.")?;
                Ok(())
            }
        }
    }

    fn add_printer(&mut self) -> Result<()> {
        let nickname = self.prompt("Nickname: ")?.trim().to_string();
        let power_consumption = self.prompt_decimal("Power consumption (kW): ")?;
        let print_time_per_unit = self.prompt_decimal("Print time per unit (hours): ")?;
        let nozzle_size = self.prompt_decimal("Nozzle size (mm): ")?;
        let bed_capacity = self.prompt_count("Bed capacity (units per batch): ")?;

        let printer = Printer::new(
            nickname.clone(),
            power_consumption,
            print_time_per_unit,
            nozzle_size,
            bed_capacity,
        );
        match self.registry.add(printer) {
            Ok(()) => writeln!(self.output, "Printer \"{}\" added.", nickname)?,
            Err(err) => writeln!(self.output, "Printer not added: {}", err)?,
        }
        Ok(())
    }

    fn remove_printer(&mut self) -> Result<()> {
        let nickname = self.prompt("Enter nickname of printer to remove: ")?;
        let nickname = nickname.trim();
        match self.registry.remove(nickname) {
            Some(_) => writeln!(self.output, "Printer \"{}\" removed.", nickname)?,
            None => writeln!(self.output, "No printer named \"{}\".", nickname)?,
        }
        Ok(())
    }

    fn calculate_costs(&mut self) -> Result<()> {
        if self.registry.is_empty() {
            writeln!(self.output, "No printers added yet.")?;
            return Ok(());
        }

        match PrintCostCalculator::new(&self.registry).calculate(&self.request) {
            Ok(result) => write!(self.output, "\n{}", report::render(&result))?,
            Err(err) => writeln!(self.output, "Calculation failed: {}", err)?,
        }
        Ok(())
    }

    fn export_printers(&mut self) -> Result<()> {
        match std::fs::write(&self.printers_file, self.registry.export()) {
            Ok(()) => writeln!(
                self.output,
                "Exported {} printer(s) to {}.",
                self.registry.len(),
                self.printers_file.display()
            )?,
            Err(err) => {
                tracing::error!("匯出失敗 {:?}: {}", self.printers_file, err);
                writeln!(self.output, "Error exporting printers: {}", err)?
            }
        }
        self.save_params()
    }

    fn save_params(&mut self) -> Result<()> {
        let Some(path) = &self.params_file else {
            return Ok(());
        };

        match self.request.save_json_file(path) {
            Ok(()) => writeln!(
                self.output,
                "Saved printing parameters to {}.",
                path.display()
            )?,
            Err(err) => {
                tracing::error!("參數保存失敗 {:?}: {}", path, err);
                writeln!(self.output, "Error saving parameters: {}", err)?
            }
        }
        Ok(())
    }

    fn load_params(&mut self) -> Result<()> {
        let Some(path) = &self.params_file else {
            return Ok(());
        };

        // 讀取失敗時保留目前參數
        match CostRequest::from_json_file(path) {
            Ok(request) => {
                self.request = request;
                writeln!(
                    self.output,
                    "Loaded printing parameters from {}.",
                    path.display()
                )?
            }
            Err(err) => {
                tracing::error!("參數讀取失敗 {:?}: {}", path, err);
                writeln!(self.output, "Error loading parameters: {}", err)?
            }
        }
        Ok(())
    }

    fn import_printers(&mut self) -> Result<()> {
        // 讀檔成功後才取代註冊表
        let text = match std::fs::read_to_string(&self.printers_file) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!("匯入失敗 {:?}: {}", self.printers_file, err);
                writeln!(self.output, "Error importing printers: {}", err)?;
                return Ok(());
            }
        };

        let import = self.registry.import(&text);
        writeln!(
            self.output,
            "Imported {} printer(s) from {}.",
            import.accepted_count(),
            self.printers_file.display()
        )?;
        for rejected in &import.rejected {
            writeln!(
                self.output,
                "Skipped line {}: {}",
                rejected.line_number, rejected.error
            )?;
        }
        self.load_params()
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, prompt: &str) -> Result<String> {
        match self.read_line(prompt)? {
            Some(line) => Ok(line),
            None => bail!("input ended while waiting for: {}", prompt.trim()),
        }
    }

    fn prompt_decimal(&mut self, prompt: &str) -> Result<Decimal> {
        loop {
            let line = self.prompt(prompt)?;
            match parse_decimal(prompt.trim(), &line) {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(
                    self.output,
                    "Invalid number format. Please try again."
                )?,
            }
        }
    }

    fn prompt_count(&mut self, prompt: &str) -> Result<u32> {
        loop {
            let line = self.prompt(prompt)?;
            match parse_count(prompt.trim(), &line) {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(
                    self.output,
                    "Invalid number format. Please enter a whole number."
                )?,
            }
        }
    }
}
