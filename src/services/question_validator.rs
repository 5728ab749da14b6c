//! 题目校验 - 业务能力层

use tracing::warn;

use crate::error::ValidationError;
use crate::models::question::{QuestionDraft, QuestionPayload};

/// 校验题目草稿
///
/// 题干与四个选项都必须非空；是否标记了正确选项不做限制，只记录警告。
pub fn validate_question(draft: &QuestionDraft) -> Result<QuestionPayload, ValidationError> {
    if !draft.is_complete() {
        return Err(ValidationError::IncompleteQuestion);
    }

    let exam_id = match draft.exam_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(ValidationError::NoExamSelected),
    };

    if !draft.has_correct_option() {
        warn!("⚠️ 题目没有标记正确选项: {}", draft.question);
    }

    Ok(QuestionPayload {
        question: draft.question.clone(),
        options: draft.options.clone(),
        exam_id,
    })
}
