//! 失败记录 - 业务能力层
//!
//! 只负责"把没提交成功的内容写进文件"，不关心流程

use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 失败记录服务
///
/// 每条被拒绝的考试或题目追加一行，方便人工补录
pub struct FailureLog {
    file_path: String,
}

impl FailureLog {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.file_path
    }

    /// 追加一条失败记录
    ///
    /// # 参数
    /// - `sheet`: 考试表名称
    /// - `item`: 失败的对象（考试名或题干）
    /// - `reason`: 失败原因
    pub fn write(&self, sheet: &str, item: &str, reason: &str) -> AppResult<()> {
        debug!("写入失败记录: {} | {} | {}", sheet, item, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .map_err(|e| AppError::file_write_failed(&self.file_path, e))?;

        let line = format!(
            "{} | 考试表 {} | {} | 原因: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            sheet,
            item.replace('\n', " "),
            reason
        );

        file.write_all(line.as_bytes())
            .map_err(|e| AppError::file_write_failed(&self.file_path, e))?;

        Ok(())
    }
}
