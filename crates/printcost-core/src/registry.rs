//! 印表機註冊表

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::interchange::{self, ImportReport};
use crate::{PrintCostError, Printer, Result};

/// 印表機註冊表
///
/// 依加入順序保存印表機，暱稱唯一。由工作階段獨佔，不做持久化。
///
/// 暱稱在存入前去除前後空白，與交換格式的解析規則一致。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Printer>", into = "Vec<Printer>")]
pub struct PrinterRegistry {
    printers: Vec<Printer>,
}

impl PrinterRegistry {
    /// 創建空的註冊表
    pub fn new() -> Self {
        Self::default()
    }

    /// 以既有印表機建立註冊表
    pub fn from_printers(printers: Vec<Printer>) -> Result<Self> {
        let mut registry = Self::new();
        registry.replace_all(printers)?;
        Ok(registry)
    }

    /// 新增印表機
    ///
    /// 不檢查數值欄位；暱稱已存在時拒絕。
    pub fn add(&mut self, printer: Printer) -> Result<()> {
        let printer = trim_nickname(printer);
        if self.find_by_nickname(&printer.nickname).is_some() {
            return Err(PrintCostError::DuplicateNickname(printer.nickname));
        }
        self.printers.push(printer);
        Ok(())
    }

    /// 依暱稱移除印表機
    pub fn remove(&mut self, nickname: &str) -> Option<Printer> {
        let index = self.printers.iter().position(|p| p.nickname == nickname)?;
        Some(self.printers.remove(index))
    }

    /// 依暱稱查找印表機
    pub fn find_by_nickname(&self, nickname: &str) -> Option<&Printer> {
        self.printers.iter().find(|p| p.nickname == nickname)
    }

    /// 以新序列整體取代
    ///
    /// 新序列含重複暱稱時失敗，且原內容保持不變。
    pub fn replace_all(&mut self, printers: Vec<Printer>) -> Result<()> {
        let printers: Vec<Printer> = printers.into_iter().map(trim_nickname).collect();
        if let Some(duplicate) = first_duplicate_nickname(&printers) {
            return Err(PrintCostError::DuplicateNickname(duplicate));
        }
        self.printers = printers;
        Ok(())
    }

    /// 從交換格式文字匯入（取代全部內容）
    pub fn import(&mut self, text: &str) -> ImportReport {
        let report = interchange::import_printers(text);
        // 匯入結果已去除重複暱稱
        self.printers = report.printers.clone();
        report
    }

    /// 匯出為交換格式文字
    pub fn export(&self) -> String {
        interchange::export_printers(&self.printers)
    }

    /// 依加入順序列出印表機
    pub fn list(&self) -> &[Printer] {
        &self.printers
    }

    /// 迭代印表機
    pub fn iter(&self) -> std::slice::Iter<'_, Printer> {
        self.printers.iter()
    }

    /// 印表機數量
    pub fn len(&self) -> usize {
        self.printers.len()
    }

    /// 檢查是否為空
    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }
}

impl<'a> IntoIterator for &'a PrinterRegistry {
    type Item = &'a Printer;
    type IntoIter = std::slice::Iter<'a, Printer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<Printer>> for PrinterRegistry {
    type Error = PrintCostError;

    fn try_from(printers: Vec<Printer>) -> Result<Self> {
        Self::from_printers(printers)
    }
}

impl From<PrinterRegistry> for Vec<Printer> {
    fn from(registry: PrinterRegistry) -> Self {
        registry.printers
    }
}

fn trim_nickname(mut printer: Printer) -> Printer {
    let trimmed = printer.nickname.trim();
    if trimmed.len() != printer.nickname.len() {
        printer.nickname = trimmed.to_string();
    }
    printer
}

fn first_duplicate_nickname(printers: &[Printer]) -> Option<String> {
    let mut seen = HashSet::new();
    printers
        .iter()
        .find(|p| !seen.insert(p.nickname.as_str()))
        .map(|p| p.nickname.clone())
}
