//! 印表機模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{PrintCostError, Result};

/// 印表機設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printer {
    /// 暱稱（註冊表內唯一）
    pub nickname: String,

    /// 功耗（kW）
    pub power_consumption: Decimal,

    /// 每批列印時間（小時）
    pub print_time_per_unit: Decimal,

    /// 噴嘴尺寸（mm），僅供顯示，不參與分配
    pub nozzle_size: Decimal,

    /// 列印床容量（每批最多件數）
    pub bed_capacity: u32,
}

impl Printer {
    /// 創建新的印表機
    pub fn new(
        nickname: String,
        power_consumption: Decimal,
        print_time_per_unit: Decimal,
        nozzle_size: Decimal,
        bed_capacity: u32,
    ) -> Self {
        Self {
            nickname,
            power_consumption,
            print_time_per_unit,
            nozzle_size,
            bed_capacity,
        }
    }

    /// 檢查是否能容納任何件數
    pub fn can_hold_units(&self) -> bool {
        self.bed_capacity > 0
    }

    /// 完成指定件數所需批次數
    ///
    /// 列印床容量為 0 時無法列印，返回 `None`。
    pub fn batches_needed(&self, units: u32) -> Option<u32> {
        if !self.can_hold_units() {
            return None;
        }
        Some(units.div_ceil(self.bed_capacity))
    }

    /// 完成指定件數所需時間（小時）
    ///
    /// 每開一批即耗費一個完整的 `print_time_per_unit`，與該批件數無關。
    /// 列印床容量為 0 時返回 `Ok(None)`；超出 `Decimal` 範圍時返回 `Overflow`。
    pub fn completion_hours(&self, units: u32) -> Result<Option<Decimal>> {
        let Some(batches) = self.batches_needed(units) else {
            return Ok(None);
        };
        Decimal::from(batches)
            .checked_mul(self.print_time_per_unit)
            .map(Some)
            .ok_or(PrintCostError::Overflow("completion_hours"))
    }

    /// 指定件數的耗電量（kWh）
    pub fn energy_kwh(&self, units: u32) -> Result<Decimal> {
        Decimal::from(units)
            .checked_mul(self.print_time_per_unit)
            .and_then(|hours| hours.checked_mul(self.power_consumption))
            .ok_or(PrintCostError::Overflow("energy_kwh"))
    }
}

impl fmt::Display for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} kW | {} h/unit | {} mm nozzle | {} units/batch",
            self.nickname,
            self.power_consumption,
            self.print_time_per_unit,
            self.nozzle_size,
            self.bed_capacity
        )
    }
}
