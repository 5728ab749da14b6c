//! 考试表单校验 - 业务能力层
//!
//! 只负责"把 ExamDraft 变成 ExamPayload"，不发请求、不关心流程。
//! 所有字段都会被检查，每个字段最多报告一条错误。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ValidationError;
use crate::models::exam::{ExamDraft, ExamField, ExamPayload, FieldError, ValidationKind};

/// 支持的本地日期时间格式（datetime-local 输入框的格式排在最前）
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// 校验考试草稿
///
/// # 返回
/// 全部通过时返回可提交的数据，否则返回所有字段错误
pub fn validate_exam(draft: &ExamDraft) -> Result<ExamPayload, ValidationError> {
    let mut errors = Vec::new();

    // 名称按原文提交，只要求非空
    let exam_name = draft.exam_name.as_str();
    if exam_name.is_empty() {
        errors.push(FieldError::new(ExamField::ExamName, ValidationKind::Required));
    }

    let total_questions = collect(
        &mut errors,
        ExamField::TotalQuestions,
        parse_count(&draft.total_questions, ValidationKind::NotPositive),
    );
    let duration = collect(
        &mut errors,
        ExamField::Duration,
        parse_count(&draft.duration, ValidationKind::BelowMinimum { min: 1 }),
    );
    let live_date = collect(&mut errors, ExamField::LiveDate, check_datetime(&draft.live_date));
    let dead_date = collect(&mut errors, ExamField::DeadDate, check_datetime(&draft.dead_date));

    match (total_questions, duration, live_date, dead_date) {
        (Some(total_questions), Some(duration), Some(live_date), Some(dead_date))
            if errors.is_empty() =>
        {
            Ok(ExamPayload {
                exam_name: exam_name.to_string(),
                total_questions,
                duration,
                live_date,
                dead_date,
            })
        }
        _ => Err(ValidationError::Exam(errors)),
    }
}

fn collect<T>(
    errors: &mut Vec<FieldError>,
    field: ExamField,
    result: Result<T, ValidationKind>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(kind) => {
            errors.push(FieldError::new(field, kind));
            None
        }
    }
}

/// 解析正整数字段
///
/// 检查顺序：必填 → 数字 → 整数 → 下限（`too_small` 决定报哪种下限错误）
fn parse_count(raw: &str, too_small: ValidationKind) -> Result<u32, ValidationKind> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationKind::Required);
    }

    let value: f64 = text.parse().map_err(|_| ValidationKind::TypeMismatch)?;
    if !value.is_finite() {
        return Err(ValidationKind::TypeMismatch);
    }
    if value.fract() != 0.0 {
        return Err(ValidationKind::NotInteger);
    }
    if value < 1.0 {
        return Err(too_small);
    }
    if value > f64::from(u32::MAX) {
        return Err(ValidationKind::TypeMismatch);
    }

    Ok(value as u32)
}

/// 检查日期时间字段，返回去掉首尾空白后的原文
fn check_datetime(raw: &str) -> Result<String, ValidationKind> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationKind::Required);
    }
    if parse_datetime(text).is_some() {
        Ok(text.to_string())
    } else {
        Err(ValidationKind::InvalidDate)
    }
}

/// 解析日期时间，支持 RFC 3339、常见的本地时间格式和纯日期
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
