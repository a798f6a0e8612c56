//! # Print Cost
//!
//! 3D 列印成本計算器：命令列、互動選單與報表輸出

pub mod cli;
pub mod logging;
pub mod report;
pub mod session;
