use serde::Deserialize;

use crate::models::exam::ExamDraft;
use crate::models::question::{QuestionOption, OPTION_COUNT};

/// 考试表：一个考试及其题目，对应一个 TOML 文件
#[derive(Debug, Clone, Deserialize)]
pub struct ExamSheet {
    pub exam: ExamDraft,
    #[serde(default)]
    pub questions: Vec<SheetQuestion>,
    #[serde(skip)]
    pub file_path: Option<String>,
}

impl ExamSheet {
    /// 用于日志显示的名称
    pub fn display_name(&self) -> String {
        if !self.exam.exam_name.trim().is_empty() {
            return self.exam.exam_name.clone();
        }
        self.file_path
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetQuestion {
    pub question: String,
    pub options: [QuestionOption; OPTION_COUNT],
}
