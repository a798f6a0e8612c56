//! # Print Cost Calculation Engine
//!
//! 件數分配與成本計算引擎

pub mod calculator;
pub mod cost;
pub mod distribution;

// Re-export 主要類型
pub use calculator::PrintCostCalculator;
pub use cost::CostCalculator;
pub use distribution::{Allocation, Distribution, DistributionCalculator};

use rust_decimal::Decimal;
use serde::Serialize;

/// 成本計算結果
#[derive(Debug, Clone, Serialize)]
pub struct CostResult {
    /// 件數分配
    pub distribution: Distribution,

    /// 各印表機明細
    pub printer_costs: Vec<PrinterCost>,

    /// 耗材成本
    pub material_cost: Decimal,

    /// 電費
    pub energy_cost: Decimal,

    /// 生產總成本（耗材 + 電費）
    pub total_cost: Decimal,

    /// 含佣金總成本
    pub total_with_commission: Decimal,

    /// 警告信息
    pub warnings: Vec<CostWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl CostResult {
    /// 添加警告
    pub fn add_warning(&mut self, warning: CostWarning) {
        self.warnings.push(warning);
    }

    /// 檢查是否有指定等級的警告
    pub fn has_warnings_of(&self, severity: WarningSeverity) -> bool {
        self.warnings.iter().any(|w| w.severity == severity)
    }
}

/// 單台印表機成本明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterCost {
    pub nickname: String,
    pub units: u32,
    pub energy_cost: Decimal,
    pub nozzle_size: Decimal,
    pub completion_hours: Decimal,
}

/// 計算警告
#[derive(Debug, Clone, Serialize)]
pub struct CostWarning {
    pub nickname: Option<String>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl CostWarning {
    pub fn new(nickname: Option<String>, message: String, severity: WarningSeverity) -> Self {
        Self {
            nickname,
            message,
            severity,
        }
    }

    pub fn info(nickname: String, message: String) -> Self {
        Self::new(Some(nickname), message, WarningSeverity::Info)
    }

    pub fn warning(nickname: Option<String>, message: String) -> Self {
        Self::new(nickname, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
