//! 列印工作參數配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::{PrintCostError, Result};

/// 列印工作參數（成本計算輸入）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRequest {
    /// 列印總件數
    pub total_units: u32,

    /// 每件耗材（克）
    pub material_per_unit: Decimal,

    /// 耗材單價（每公斤）
    pub material_cost_per_kg: Decimal,

    /// 供應商是否提供折扣
    pub has_discount: bool,

    /// 折扣率（0~1 的比例）
    pub discount_rate: Decimal,

    /// 電價（每 kWh）
    pub energy_cost_per_kwh: Decimal,

    /// 每件佣金
    pub commission_per_unit: Decimal,
}

impl CostRequest {
    /// 創建新的工作參數
    pub fn new(total_units: u32) -> Self {
        Self {
            total_units,
            ..Self::default()
        }
    }

    /// 建構器模式：設置耗材用量與單價
    pub fn with_material(mut self, grams_per_unit: Decimal, cost_per_kg: Decimal) -> Self {
        self.material_per_unit = grams_per_unit;
        self.material_cost_per_kg = cost_per_kg;
        self
    }

    /// 建構器模式：設置折扣率（比例）
    pub fn with_discount(mut self, rate: Decimal) -> Self {
        self.has_discount = true;
        self.discount_rate = rate;
        self
    }

    /// 建構器模式：設置電價
    pub fn with_energy_cost(mut self, cost_per_kwh: Decimal) -> Self {
        self.energy_cost_per_kwh = cost_per_kwh;
        self
    }

    /// 建構器模式：設置每件佣金
    pub fn with_commission(mut self, commission_per_unit: Decimal) -> Self {
        self.commission_per_unit = commission_per_unit;
        self
    }

    /// 建構器模式：設置總件數
    pub fn with_total_units(mut self, total_units: u32) -> Self {
        self.total_units = total_units;
        self
    }

    /// 實際生效的折扣倍率（無折扣時為 1）
    pub fn discount_multiplier(&self) -> Result<Decimal> {
        if !self.has_discount {
            return Ok(Decimal::ONE);
        }
        Decimal::ONE
            .checked_sub(self.discount_rate)
            .ok_or(PrintCostError::Overflow("discount_multiplier"))
    }

    /// 檢查折扣率是否落在 0~1 之間
    pub fn discount_rate_in_range(&self) -> bool {
        !self.has_discount || (Decimal::ZERO..=Decimal::ONE).contains(&self.discount_rate)
    }

    /// 從 JSON 字串讀取
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 從 JSON 檔案讀取
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 轉為 JSON 字串
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 寫入 JSON 檔案
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

/// 解析使用者輸入的小數
///
/// 同時接受 `.` 與 `,` 作為小數點。
pub fn parse_decimal(field: &str, input: &str) -> Result<Decimal> {
    let normalized = input.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| PrintCostError::InvalidNumber {
        field: field.to_string(),
        value: input.to_string(),
    })
}

/// 解析使用者輸入的非負整數
pub fn parse_count(field: &str, input: &str) -> Result<u32> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| PrintCostError::InvalidNumber {
            field: field.to_string(),
            value: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_request() {
        let request = CostRequest::new(100);

        assert_eq!(request.total_units, 100);
        assert!(!request.has_discount);
        assert_eq!(request.discount_multiplier().unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_request_builder() {
        let request = CostRequest::new(50)
            .with_material(Decimal::from(10), Decimal::from(20))
            .with_discount(Decimal::new(15, 2))
            .with_energy_cost(Decimal::new(15, 2))
            .with_commission(Decimal::from(2));

        assert_eq!(request.material_per_unit, Decimal::from(10));
        assert_eq!(request.material_cost_per_kg, Decimal::from(20));
        assert!(request.has_discount);
        assert_eq!(request.discount_multiplier().unwrap(), Decimal::new(85, 2));
        assert_eq!(request.energy_cost_per_kwh, Decimal::new(15, 2));
        assert_eq!(request.commission_per_unit, Decimal::from(2));
    }

    #[test]
    fn test_discount_rate_ignored_without_flag() {
        let mut request = CostRequest::new(10);
        request.discount_rate = Decimal::new(5, 1);

        assert_eq!(request.discount_multiplier().unwrap(), Decimal::ONE);
        assert!(request.discount_rate_in_range());
    }

    #[test]
    fn test_discount_rate_range() {
        assert!(!CostRequest::new(1)
            .with_discount(Decimal::from(15))
            .discount_rate_in_range());
        assert!(CostRequest::new(1)
            .with_discount(Decimal::ONE)
            .discount_rate_in_range());
    }

    #[test]
    fn test_from_json_with_defaults() {
        let request = CostRequest::from_json_str(
            r#"{"total_units": 12, "energy_cost_per_kwh": 0.15, "has_discount": true, "discount_rate": "0.1"}"#,
        )
        .unwrap();

        assert_eq!(request.total_units, 12);
        assert_eq!(request.energy_cost_per_kwh, Decimal::new(15, 2));
        assert_eq!(request.discount_rate, Decimal::new(1, 1));
        assert_eq!(request.material_per_unit, Decimal::ZERO);
    }

    #[test]
    fn test_discount_multiplier_overflow() {
        let request = CostRequest::new(1).with_discount(Decimal::MIN);
        assert!(matches!(
            request.discount_multiplier(),
            Err(PrintCostError::Overflow(_))
        ));
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        let request = CostRequest::new(40)
            .with_material(Decimal::new(125, 1), Decimal::from(22))
            .with_discount(Decimal::new(1, 1))
            .with_energy_cost(Decimal::new(3, 1))
            .with_commission(Decimal::new(75, 2));

        request.save_json_file(&path).unwrap();
        assert_eq!(CostRequest::from_json_file(&path).unwrap(), request);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = CostRequest::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, PrintCostError::Json(_)));
    }

    #[rstest]
    #[case("1.5", Decimal::new(15, 1))]
    #[case("1,5", Decimal::new(15, 1))]
    #[case(" 20 ", Decimal::from(20))]
    #[case("-0.25", Decimal::new(-25, 2))]
    fn test_parse_decimal(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_decimal("value", input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1.2.3")]
    fn test_parse_decimal_invalid(#[case] input: &str) {
        assert!(matches!(
            parse_decimal("value", input),
            Err(PrintCostError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("units", " 42 ").unwrap(), 42);
        assert!(parse_count("units", "-3").is_err());
        assert!(parse_count("units", "2.5").is_err());
    }
}
