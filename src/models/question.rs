use serde::{Deserialize, Serialize};

/// 每道题固定的选项数量
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    #[serde(default, alias = "text")]
    pub option_text: String,
    #[serde(default, alias = "correct")]
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn new(option_text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            option_text: option_text.into(),
            is_correct,
        }
    }
}

/// 题目草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub options: [QuestionOption; OPTION_COUNT],
    /// 目标考试，从已加载的考试列表中选择
    pub exam_id: Option<String>,
}

impl QuestionDraft {
    /// 清空题干与选项，保留已选考试
    pub fn cleared(&self) -> Self {
        Self {
            exam_id: self.exam_id.clone(),
            ..Self::default()
        }
    }

    /// 题干和四个选项都非空（纯空白视为空）
    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty()
            && self
                .options
                .iter()
                .all(|option| !option.option_text.trim().is_empty())
    }

    pub fn has_correct_option(&self) -> bool {
        self.options.iter().any(|option| option.is_correct)
    }
}

/// 提交到服务端的题目数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    pub question: String,
    pub options: [QuestionOption; OPTION_COUNT],
    pub exam_id: String,
}

/// 服务端确认后的题目记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub exam_id: Option<String>,
}

impl QuestionRecord {
    /// 正确选项的序号（从1开始）
    pub fn correct_positions(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct)
            .map(|(i, _)| i + 1)
            .collect()
    }
}
