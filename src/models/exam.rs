//! 考试相关数据结构
//!
//! `ExamDraft` 保存表单中的原始文本，校验通过后得到可提交的 `ExamPayload`

use serde::{Deserialize, Serialize};
use std::fmt;

/// 考试草稿（表单原始输入）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDraft {
    #[serde(default, alias = "examName", deserialize_with = "deserialize_text")]
    pub exam_name: String,
    #[serde(default, alias = "totalQuestions", deserialize_with = "deserialize_text")]
    pub total_questions: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub duration: String,
    #[serde(default, alias = "liveDate", deserialize_with = "deserialize_text")]
    pub live_date: String,
    #[serde(default, alias = "deadDate", deserialize_with = "deserialize_text")]
    pub dead_date: String,
}

impl ExamDraft {
    pub fn new(
        exam_name: impl Into<String>,
        total_questions: impl Into<String>,
        duration: impl Into<String>,
        live_date: impl Into<String>,
        dead_date: impl Into<String>,
    ) -> Self {
        Self {
            exam_name: exam_name.into(),
            total_questions: total_questions.into(),
            duration: duration.into(),
            live_date: live_date.into(),
            dead_date: dead_date.into(),
        }
    }

    /// 读取某个字段的原始文本
    pub fn field(&self, field: ExamField) -> &str {
        match field {
            ExamField::ExamName => &self.exam_name,
            ExamField::TotalQuestions => &self.total_questions,
            ExamField::Duration => &self.duration,
            ExamField::LiveDate => &self.live_date,
            ExamField::DeadDate => &self.dead_date,
        }
    }

    /// 返回修改了某个字段后的新草稿
    pub fn with_field(&self, field: ExamField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            ExamField::ExamName => next.exam_name = value,
            ExamField::TotalQuestions => next.total_questions = value,
            ExamField::Duration => next.duration = value,
            ExamField::LiveDate => next.live_date = value,
            ExamField::DeadDate => next.dead_date = value,
        }
        next
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 考试表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExamField {
    ExamName,
    TotalQuestions,
    Duration,
    LiveDate,
    DeadDate,
}

impl ExamField {
    pub const ALL: [ExamField; 5] = [
        ExamField::ExamName,
        ExamField::TotalQuestions,
        ExamField::Duration,
        ExamField::LiveDate,
        ExamField::DeadDate,
    ];

    /// 表单上显示的字段名
    pub fn label(self) -> &'static str {
        match self {
            ExamField::ExamName => "Exam Name",
            ExamField::TotalQuestions => "Total Number of Questions",
            ExamField::Duration => "Exam Duration",
            ExamField::LiveDate => "Live Date and Time",
            ExamField::DeadDate => "Dead Date and Time",
        }
    }
}

/// 字段校验失败的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Required,
    TypeMismatch,
    NotInteger,
    NotPositive,
    BelowMinimum { min: u32 },
    InvalidDate,
}

/// 单个字段的校验错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: ExamField,
    pub kind: ValidationKind,
}

impl FieldError {
    pub fn new(field: ExamField, kind: ValidationKind) -> Self {
        Self { field, kind }
    }

    /// 表单上展示的错误文案
    pub fn message(&self) -> String {
        let label = self.field.label();
        match self.kind {
            ValidationKind::Required => format!("{} is required", label),
            ValidationKind::TypeMismatch => format!("{} must be a number", label),
            ValidationKind::NotInteger => format!("{} must be an integer", label),
            ValidationKind::NotPositive => format!("{} must be positive", label),
            ValidationKind::BelowMinimum { min } => {
                let unit = if min == 1 { "minute" } else { "minutes" };
                format!("{} must be at least {} {}", label, min, unit)
            }
            ValidationKind::InvalidDate => format!("{} must be a valid date", label),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// 校验通过、可以提交的考试数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamPayload {
    pub exam_name: String,
    pub total_questions: u32,
    pub duration: u32,
    /// 日期保持用户输入的原文（已确认可解析）
    pub live_date: String,
    pub dead_date: String,
}

/// 创建考试后服务端返回的记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub exam_id: Option<String>,
    #[serde(default)]
    pub exam_name: Option<String>,
    #[serde(default)]
    pub total_questions: Option<u32>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub live_date: Option<String>,
    #[serde(default)]
    pub dead_date: Option<String>,
}

impl ExamRecord {
    /// 考试标识：优先 examId，其次 _id
    pub fn identifier(&self) -> Option<&str> {
        self.exam_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.id.as_deref().filter(|id| !id.is_empty()))
    }
}

/// 考试列表中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSummary {
    pub exam_id: String,
    pub exam_name: String,
}

impl ExamSummary {
    pub fn new(exam_id: impl Into<String>, exam_name: impl Into<String>) -> Self {
        Self {
            exam_id: exam_id.into(),
            exam_name: exam_name.into(),
        }
    }
}

// 表单字段既可能写成字符串也可能写成数字，统一转成文本
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
