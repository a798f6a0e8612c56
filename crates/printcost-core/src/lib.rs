//! # Print Cost Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod interchange;
pub mod printer;
pub mod registry;

// Re-export 主要類型
pub use config::CostRequest;
pub use interchange::{ImportLineError, ImportReport, RejectedLine};
pub use printer::Printer;
pub use registry::PrinterRegistry;

/// 列印成本錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PrintCostError {
    #[error("尚未新增任何印表機")]
    EmptyRegistry,

    #[error("所有印表機的列印床容量皆為 0，無法分配")]
    NoUsableCapacity,

    #[error("印表機暱稱重複: {0}")]
    DuplicateNickname(String),

    #[error("找不到印表機: {0}")]
    PrinterNotFound(String),

    #[error("無效的數值 {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("計算 {0} 時數值溢位")]
    Overflow(&'static str),

    #[error("讀寫錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 格式錯誤: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrintCostError>;
