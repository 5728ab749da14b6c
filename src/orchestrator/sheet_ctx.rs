//! 考试表处理上下文
//!
//! 封装"我正在处理第几张考试表"这一信息，只用于日志

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct SheetCtx {
    /// 考试表索引（从1开始）
    pub sheet_index: usize,

    /// 考试表名称
    pub sheet_name: String,
}

impl SheetCtx {
    pub fn new(sheet_index: usize, sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_index,
            sheet_name: sheet_name.into(),
        }
    }

    /// 日志前缀
    pub fn prefix(&self) -> String {
        format!("[考试表 {}]", self.sheet_index)
    }
}

impl Display for SheetCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[考试表 #{} {}]", self.sheet_index, self.sheet_name)
    }
}
