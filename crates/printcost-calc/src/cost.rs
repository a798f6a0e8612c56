//! 成本公式

use printcost_core::{CostRequest, PrintCostError, Printer, PrinterRegistry, Result};
use rust_decimal::Decimal;

use crate::distribution::Distribution;
use crate::PrinterCost;

/// 每公斤克數
const GRAMS_PER_KG: u32 = 1000;

/// 成本計算器
///
/// 所有公式皆使用 checked 運算，超出 `Decimal` 範圍時返回 `Overflow`。
pub struct CostCalculator;

impl CostCalculator {
    /// 耗材成本（含折扣）
    ///
    /// `(件數 × 每件克數 / 1000) × 每公斤單價 × (有折扣 ? 1 - 折扣率 : 1)`
    pub fn material_cost(request: &CostRequest) -> Result<Decimal> {
        let multiplier = request.discount_multiplier()?;
        Decimal::from(request.total_units)
            .checked_mul(request.material_per_unit)
            .and_then(|grams| grams.checked_div(Decimal::from(GRAMS_PER_KG)))
            .and_then(|kg| kg.checked_mul(request.material_cost_per_kg))
            .and_then(|cost| cost.checked_mul(multiplier))
            .ok_or(PrintCostError::Overflow("material_cost"))
    }

    /// 單台印表機的電費
    pub fn printer_energy_cost(
        printer: &Printer,
        units: u32,
        energy_cost_per_kwh: Decimal,
    ) -> Result<Decimal> {
        printer
            .energy_kwh(units)?
            .checked_mul(energy_cost_per_kwh)
            .ok_or(PrintCostError::Overflow("printer_energy_cost"))
    }

    /// 各印表機明細（依分配順序）
    ///
    /// 分配結果中的暱稱必須存在於註冊表，否則返回 `PrinterNotFound`。
    pub fn printer_costs(
        registry: &PrinterRegistry,
        distribution: &Distribution,
        energy_cost_per_kwh: Decimal,
    ) -> Result<Vec<PrinterCost>> {
        distribution
            .iter()
            .map(|allocation| {
                let printer = registry
                    .find_by_nickname(&allocation.nickname)
                    .ok_or_else(|| PrintCostError::PrinterNotFound(allocation.nickname.clone()))?;
                let energy_cost =
                    Self::printer_energy_cost(printer, allocation.units, energy_cost_per_kwh)?;

                tracing::debug!(
                    "印表機 {}: {} 件, 電費 {}",
                    printer.nickname,
                    allocation.units,
                    energy_cost
                );

                Ok(PrinterCost {
                    nickname: printer.nickname.clone(),
                    units: allocation.units,
                    energy_cost,
                    nozzle_size: printer.nozzle_size,
                    completion_hours: allocation.completion_hours,
                })
            })
            .collect()
    }

    /// 明細電費加總
    pub fn sum_energy(printer_costs: &[PrinterCost]) -> Result<Decimal> {
        printer_costs
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.energy_cost))
            .ok_or(PrintCostError::Overflow("energy_cost"))
    }

    /// 總電費
    ///
    /// 分配結果中的暱稱必須存在於註冊表，否則返回 `PrinterNotFound`。
    pub fn energy_cost(
        registry: &PrinterRegistry,
        distribution: &Distribution,
        energy_cost_per_kwh: Decimal,
    ) -> Result<Decimal> {
        let lines = Self::printer_costs(registry, distribution, energy_cost_per_kwh)?;
        Self::sum_energy(&lines)
    }

    /// 生產總成本
    pub fn total_cost(material_cost: Decimal, energy_cost: Decimal) -> Result<Decimal> {
        material_cost
            .checked_add(energy_cost)
            .ok_or(PrintCostError::Overflow("total_cost"))
    }

    /// 含佣金總成本
    pub fn total_with_commission(
        total_cost: Decimal,
        commission_per_unit: Decimal,
        total_units: u32,
    ) -> Result<Decimal> {
        commission_per_unit
            .checked_mul(Decimal::from(total_units))
            .and_then(|commission| total_cost.checked_add(commission))
            .ok_or(PrintCostError::Overflow("total_with_commission"))
    }
}
