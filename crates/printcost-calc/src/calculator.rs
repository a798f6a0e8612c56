//! 列印成本主計算器

use printcost_core::{CostRequest, PrintCostError, PrinterRegistry};

use crate::cost::CostCalculator;
use crate::distribution::DistributionCalculator;
use crate::{CostResult, CostWarning};

/// 列印成本計算器
pub struct PrintCostCalculator<'a> {
    /// 印表機註冊表（唯讀）
    registry: &'a PrinterRegistry,
}

impl<'a> PrintCostCalculator<'a> {
    /// 創建新的計算器
    pub fn new(registry: &'a PrinterRegistry) -> Self {
        Self { registry }
    }

    /// 主計算入口
    pub fn calculate(&self, request: &CostRequest) -> printcost_core::Result<CostResult> {
        tracing::info!(
            "開始成本計算：{} 件，印表機 {} 台",
            request.total_units,
            self.registry.len()
        );

        if self.registry.is_empty() {
            return Err(PrintCostError::EmptyRegistry);
        }

        let start_time = std::time::Instant::now();

        // Step 1: 件數分配
        tracing::debug!("Step 1: 件數分配");
        let distribution =
            DistributionCalculator::distribute(request.total_units, self.registry.list())?;

        // Step 2: 耗材成本
        tracing::debug!("Step 2: 耗材成本");
        let material_cost = CostCalculator::material_cost(request)?;

        // Step 3: 電費（逐台明細後加總）
        tracing::debug!("Step 3: 電費");
        let printer_costs = CostCalculator::printer_costs(
            self.registry,
            &distribution,
            request.energy_cost_per_kwh,
        )?;
        let energy_cost = CostCalculator::sum_energy(&printer_costs)?;

        // Step 4: 總成本
        tracing::debug!("Step 4: 總成本");
        let total_cost = CostCalculator::total_cost(material_cost, energy_cost)?;
        let total_with_commission = CostCalculator::total_with_commission(
            total_cost,
            request.commission_per_unit,
            request.total_units,
        )?;

        let mut result = CostResult {
            distribution,
            printer_costs,
            material_cost,
            energy_cost,
            total_cost,
            total_with_commission,
            warnings: Vec::new(),
            calculation_time_ms: None,
        };
        self.collect_warnings(request, &mut result);
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("成本計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!("含佣金總成本: {}", result.total_with_commission);

        Ok(result)
    }

    fn collect_warnings(&self, request: &CostRequest, result: &mut CostResult) {
        for printer in self.registry {
            if !printer.can_hold_units() {
                tracing::warn!("印表機 {} 列印床容量為 0，已略過", printer.nickname);
                result.add_warning(CostWarning::warning(
                    Some(printer.nickname.clone()),
                    "bed capacity is 0, printer skipped".to_string(),
                ));
            } else if request.total_units > 0
                && result.distribution.units_for(&printer.nickname) == Some(0)
            {
                result.add_warning(CostWarning::info(
                    printer.nickname.clone(),
                    "no units assigned".to_string(),
                ));
            }
        }

        if !request.discount_rate_in_range() {
            tracing::warn!("折扣率 {} 超出 0~1 範圍", request.discount_rate);
            result.add_warning(CostWarning::warning(
                None,
                format!("discount rate {} is outside 0..=1", request.discount_rate),
            ));
        }
    }
}
