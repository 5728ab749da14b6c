//! 表单状态
//!
//! 两个流程的全部可变数据都放在显式的状态结构里。
//! 状态转换都是纯函数：根据当前状态和一个事件返回新状态，不做 IO。

use crate::error::{AppResult, BusinessError};
use crate::models::exam::{ExamDraft, ExamField, ExamPayload, ExamSummary};
use crate::models::question::{QuestionDraft, QuestionOption, QuestionPayload, QuestionRecord, OPTION_COUNT};
use crate::services::{validate_exam, validate_question};

/// 创建考试表单的状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamFormState {
    pub draft: ExamDraft,
    /// 是否有创建请求尚未返回
    pub in_flight: bool,
}

impl ExamFormState {
    /// 修改一个字段
    pub fn edit(&self, field: ExamField, value: impl Into<String>) -> Self {
        Self {
            draft: self.draft.with_field(field, value),
            in_flight: self.in_flight,
        }
    }

    /// 整体替换草稿
    pub fn replace_draft(&self, draft: ExamDraft) -> Self {
        Self {
            draft,
            in_flight: self.in_flight,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight
    }

    /// 开始提交：校验通过则进入 in_flight 并返回要发送的数据
    pub fn begin_submit(&self) -> AppResult<(Self, ExamPayload)> {
        if self.in_flight {
            return Err(BusinessError::SubmitInFlight.into());
        }
        let payload = validate_exam(&self.draft)?;
        let next = Self {
            draft: self.draft.clone(),
            in_flight: true,
        };
        Ok((next, payload))
    }

    /// 提交成功：表单回到初始的空状态
    pub fn submit_succeeded(&self) -> Self {
        Self::default()
    }

    /// 提交失败：保留用户输入以便重试
    pub fn submit_failed(&self) -> Self {
        Self {
            draft: self.draft.clone(),
            in_flight: false,
        }
    }
}

/// 添加题目表单的状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFormState {
    pub draft: QuestionDraft,
    /// 服务端提供的考试列表
    pub exams: Vec<ExamSummary>,
    /// 默认选中第一个考试的动作是否已经执行过
    pub has_auto_selected: bool,
    /// 本次会话中服务端已确认的题目，按添加顺序
    pub pending: Vec<QuestionRecord>,
    pub in_flight: bool,
}

impl QuestionFormState {
    /// 考试列表加载（或刷新）完成
    ///
    /// 列表第一次非空时默认选中第一个考试；之后的刷新不覆盖用户的选择。
    /// 若当前没有选中的考试，或选中的考试已不在新列表中，改选新列表的第一个
    /// （列表为空则清空选择）。
    pub fn exams_loaded(&self, exams: Vec<ExamSummary>) -> Self {
        let mut next = self.clone();

        if !next.has_auto_selected {
            if let Some(first) = exams.first() {
                next.draft.exam_id = Some(first.exam_id.clone());
                next.has_auto_selected = true;
            }
        } else {
            let still_listed = next
                .draft
                .exam_id
                .as_deref()
                .is_some_and(|selected| exams.iter().any(|exam| exam.exam_id == selected));
            if !still_listed {
                next.draft.exam_id = exams.first().map(|exam| exam.exam_id.clone());
            }
        }

        next.exams = exams;
        next
    }

    /// 选择考试，只接受已加载列表中的考试
    pub fn select_exam(&self, exam_id: &str) -> AppResult<Self> {
        if !self.exams.iter().any(|exam| exam.exam_id == exam_id) {
            return Err(BusinessError::UnknownExam {
                exam_id: exam_id.to_string(),
            }
            .into());
        }
        let mut next = self.clone();
        next.draft.exam_id = Some(exam_id.to_string());
        next.has_auto_selected = true;
        Ok(next)
    }

    pub fn set_question_text(&self, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.draft.question = text.into();
        next
    }

    pub fn set_option_text(&self, index: usize, text: impl Into<String>) -> AppResult<Self> {
        check_option_index(index)?;
        let mut next = self.clone();
        next.draft.options[index].option_text = text.into();
        Ok(next)
    }

    /// 切换某个选项的"正确"标记
    pub fn toggle_correct(&self, index: usize) -> AppResult<Self> {
        check_option_index(index)?;
        let mut next = self.clone();
        let option = &mut next.draft.options[index];
        option.is_correct = !option.is_correct;
        Ok(next)
    }

    /// 一次性填入题干和选项，考试选择不变
    pub fn fill(&self, question: impl Into<String>, options: [QuestionOption; OPTION_COUNT]) -> Self {
        let mut next = self.clone();
        next.draft.question = question.into();
        next.draft.options = options;
        next
    }

    pub fn can_add(&self) -> bool {
        !self.in_flight
    }

    pub fn can_finalize(&self) -> bool {
        !self.pending.is_empty()
    }

    /// 开始添加题目：校验通过则进入 in_flight 并返回要发送的数据
    pub fn begin_add(&self) -> AppResult<(Self, QuestionPayload)> {
        if self.in_flight {
            return Err(BusinessError::SubmitInFlight.into());
        }
        let payload = validate_question(&self.draft)?;
        let mut next = self.clone();
        next.in_flight = true;
        Ok((next, payload))
    }

    /// 添加成功：记录追加到末尾，清空题干/选项/标记，保留考试选择
    pub fn add_succeeded(&self, record: QuestionRecord) -> Self {
        let mut next = self.clone();
        next.pending.push(record);
        next.draft = self.draft.cleared();
        next.in_flight = false;
        next
    }

    /// 添加失败：除 in_flight 外不做任何修改
    pub fn add_failed(&self) -> Self {
        let mut next = self.clone();
        next.in_flight = false;
        next
    }

    /// 确认本批题目：清空待确认列表并重置草稿，不涉及网络
    pub fn finalize(&self) -> AppResult<Self> {
        if !self.can_finalize() {
            return Err(BusinessError::EmptyBatch.into());
        }
        let mut next = self.clone();
        next.pending.clear();
        next.draft = self.draft.cleared();
        Ok(next)
    }
}

/// 请求在途期间持有；无论请求完成还是 future 被取消，离开作用域时都清除 in_flight
pub(crate) struct InFlightReset<'a> {
    in_flight: &'a mut bool,
}

impl<'a> InFlightReset<'a> {
    pub(crate) fn new(in_flight: &'a mut bool) -> Self {
        Self { in_flight }
    }
}

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        *self.in_flight = false;
    }
}

fn check_option_index(index: usize) -> Result<(), BusinessError> {
    if index >= OPTION_COUNT {
        return Err(BusinessError::OptionIndexOutOfRange {
            index,
            max_index: OPTION_COUNT - 1,
        });
    }
    Ok(())
}
