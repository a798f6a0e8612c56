//! 件數分配（貪婪最早完工）
//!
//! 一次分配一件：對每台印表機計算「再多一件」時的完工時間，
//! 選擇完工時間最小者；平手時取註冊順序中最先出現的印表機。
//! 批次讓完工時間成為件數的階梯函數，因此每一步都需重新計算批次邊界。

use printcost_core::{PrintCostError, Printer, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// 單台印表機的分配結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    /// 印表機暱稱
    pub nickname: String,
    /// 分配件數
    pub units: u32,
    /// 預計完工時間（小時）
    pub completion_hours: Decimal,
}

/// 分配結果（依註冊表順序，涵蓋每台印表機）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    allocations: Vec<Allocation>,
}

impl Distribution {
    /// 依暱稱取得分配件數
    pub fn units_for(&self, nickname: &str) -> Option<u32> {
        self.allocations
            .iter()
            .find(|a| a.nickname == nickname)
            .map(|a| a.units)
    }

    /// 分配總件數
    pub fn total_units(&self) -> u32 {
        self.allocations.iter().map(|a| a.units).sum()
    }

    /// 最晚完工時間（小時）
    pub fn makespan(&self) -> Decimal {
        self.allocations
            .iter()
            .map(|a| a.completion_hours)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// 迭代分配結果
    pub fn iter(&self) -> std::slice::Iter<'_, Allocation> {
        self.allocations.iter()
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = &'a Allocation;
    type IntoIter = std::slice::Iter<'a, Allocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 分配計算器
pub struct DistributionCalculator;

impl DistributionCalculator {
    /// 將 `total_units` 件分配到各印表機
    ///
    /// # 錯誤
    /// * `EmptyRegistry` - 沒有任何印表機
    /// * `NoUsableCapacity` - 所有印表機列印床容量皆為 0
    /// * `Overflow` - 完工時間超出 `Decimal` 範圍
    ///
    /// 列印床容量為 0 的印表機不參與挑選，分配件數固定為 0。
    /// 不會修改傳入的印表機資料。
    pub fn distribute(total_units: u32, printers: &[Printer]) -> Result<Distribution> {
        if printers.is_empty() {
            return Err(PrintCostError::EmptyRegistry);
        }
        if !printers.iter().any(Printer::can_hold_units) {
            return Err(PrintCostError::NoUsableCapacity);
        }

        tracing::debug!(
            "開始分配：{} 件，{} 台印表機",
            total_units,
            printers.len()
        );

        // 本次計算的暫存狀態
        let mut assigned = vec![0u32; printers.len()];
        let mut completion = vec![Decimal::ZERO; printers.len()];

        for unit in 1..=total_units {
            let (index, hours) = Self::select_printer(printers, &assigned)?
                .ok_or(PrintCostError::NoUsableCapacity)?;

            assigned[index] += 1;
            completion[index] = hours;

            tracing::trace!(
                "第 {} 件 → {} (累計 {} 件, 完工 {}h)",
                unit,
                printers[index].nickname,
                assigned[index],
                hours
            );
        }

        let allocations = printers
            .iter()
            .zip(assigned)
            .zip(completion)
            .map(|((printer, units), completion_hours)| Allocation {
                nickname: printer.nickname.clone(),
                units,
                completion_hours,
            })
            .collect();

        let distribution = Distribution { allocations };
        tracing::debug!("分配完成，最晚完工 {}h", distribution.makespan());

        Ok(distribution)
    }

    /// 選出「再多一件」後完工時間最小的印表機
    ///
    /// 僅在嚴格更小時替換，因此平手時保留最先出現者。
    fn select_printer(
        printers: &[Printer],
        assigned: &[u32],
    ) -> Result<Option<(usize, Decimal)>> {
        let mut best: Option<(usize, Decimal)> = None;

        for (index, printer) in printers.iter().enumerate() {
            let Some(hours) = printer.completion_hours(assigned[index] + 1)? else {
                continue;
            };
            if best.map_or(true, |(_, best_hours)| hours < best_hours) {
                best = Some((index, hours));
            }
        }

        Ok(best)
    }
}
