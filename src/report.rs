//! 計算結果輸出格式

use printcost_calc::{CostResult, WarningSeverity};
use printcost_core::PrinterRegistry;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

/// 金額與數值固定兩位小數
pub fn two_dp(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// 將計算結果轉為文字報表
pub fn render(result: &CostResult) -> String {
    let mut out = String::new();

    out.push_str("Optimized Printer Distribution:\n");
    for line in &result.printer_costs {
        let _ = writeln!(
            out,
            "  {} -> Units: {}, Energy Cost: ${}, Done in: {}h (Nozzle: {}mm)",
            line.nickname,
            line.units,
            two_dp(line.energy_cost),
            two_dp(line.completion_hours),
            two_dp(line.nozzle_size)
        );
    }

    let _ = writeln!(out, "Total Material Cost: ${}", two_dp(result.material_cost));
    let _ = writeln!(out, "Total Energy Cost: ${}", two_dp(result.energy_cost));
    let _ = writeln!(out, "Total Production Cost: ${}", two_dp(result.total_cost));
    let _ = writeln!(
        out,
        "Total Cost with Commission: ${}",
        two_dp(result.total_with_commission)
    );
    let _ = writeln!(
        out,
        "Estimated Completion: {}h",
        two_dp(result.distribution.makespan())
    );

    for warning in &result.warnings {
        let label = match warning.severity {
            WarningSeverity::Info => "note",
            WarningSeverity::Warning => "warning",
        };
        match &warning.nickname {
            Some(nickname) => {
                let _ = writeln!(out, "{}: {}: {}", label, nickname, warning.message);
            }
            None => {
                let _ = writeln!(out, "{}: {}", label, warning.message);
            }
        }
    }

    out
}

/// 印表機清單
pub fn render_printers(registry: &PrinterRegistry) -> String {
    if registry.is_empty() {
        return "No printers available.\n".to_string();
    }
    registry
        .iter()
        .map(|printer| format!("• {}\n", printer))
        .collect()
}
