//! 印表機設定交換格式
//!
//! 每行一台印表機，五個以逗號分隔的欄位：
//! `nickname,powerConsumption,printTimePerUnit,nozzleSize,bedCapacity`。
//! 不支援跳脫，暱稱中含逗號會破壞該行。

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

use crate::Printer;

/// 每行欄位數
pub const FIELD_COUNT: usize = 5;

/// 單行匯入錯誤
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportLineError {
    #[error("欄位數應為 5，實際為 {field_count}")]
    MalformedLine { field_count: usize },

    #[error("欄位 {field} 不是有效數值: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("暱稱重複: {0}")]
    DuplicateNickname(String),
}

/// 被略過的行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 行號（從 1 起算）
    pub line_number: usize,
    /// 原始內容
    pub content: String,
    /// 錯誤原因
    pub error: ImportLineError,
}

/// 匯入結果
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// 成功解析的印表機（依檔案順序）
    pub printers: Vec<Printer>,
    /// 被略過的行
    pub rejected: Vec<RejectedLine>,
}

impl ImportReport {
    /// 成功匯入數量
    pub fn accepted_count(&self) -> usize {
        self.printers.len()
    }

    /// 檢查是否全部成功
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// 將印表機格式化為一行
pub fn format_printer_line(printer: &Printer) -> String {
    format!(
        "{},{},{},{},{}",
        printer.nickname,
        printer.power_consumption,
        printer.print_time_per_unit,
        printer.nozzle_size,
        printer.bed_capacity
    )
}

/// 匯出多台印表機（無標題列、以換行串接）
pub fn export_printers<'a>(printers: impl IntoIterator<Item = &'a Printer>) -> String {
    printers
        .into_iter()
        .map(format_printer_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// 解析單行
pub fn parse_printer_line(line: &str) -> Result<Printer, ImportLineError> {
    let fields: Vec<&str> = line.trim_end_matches('\r').split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(ImportLineError::MalformedLine {
            field_count: fields.len(),
        });
    }

    let nickname = fields[0].trim().to_string();
    let power_consumption = parse_decimal_field("powerConsumption", fields[1])?;
    let print_time_per_unit = parse_decimal_field("printTimePerUnit", fields[2])?;
    let nozzle_size = parse_decimal_field("nozzleSize", fields[3])?;
    let bed_capacity = fields[4]
        .trim()
        .parse::<u32>()
        .map_err(|_| ImportLineError::InvalidNumber {
            field: "bedCapacity",
            value: fields[4].to_string(),
        })?;

    Ok(Printer::new(
        nickname,
        power_consumption,
        print_time_per_unit,
        nozzle_size,
        bed_capacity,
    ))
}

/// 解析整份文字
///
/// 空白行直接忽略；格式錯誤或暱稱重複的行記入 `rejected`，不會產生部分記錄。
pub fn import_printers(text: &str) -> ImportReport {
    let mut report = ImportReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let parsed = parse_printer_line(line).and_then(|printer| {
            if seen.contains(&printer.nickname) {
                Err(ImportLineError::DuplicateNickname(printer.nickname))
            } else {
                Ok(printer)
            }
        });

        match parsed {
            Ok(printer) => {
                seen.insert(printer.nickname.clone());
                report.printers.push(printer);
            }
            Err(error) => report.rejected.push(RejectedLine {
                line_number: index + 1,
                content: line.to_string(),
                error,
            }),
        }
    }

    report
}

fn parse_decimal_field(field: &'static str, value: &str) -> Result<Decimal, ImportLineError> {
    Decimal::from_str(value.trim()).map_err(|_| ImportLineError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
