//! 添加题目流程 - 流程层
//!
//! 核心职责：一道题一道题地提交到服务端，并在本地累积已确认的题目
//!
//! 流程顺序：
//! 1. 加载考试列表 → 默认选中第一个考试
//! 2. 校验题干和选项 → 创建题目 → 追加到待确认列表
//! 3. 确认本批（只清空本地列表，不发请求）

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::ExamApi;
use crate::error::{AppError, AppResult};
use crate::models::exam::ExamSummary;
use crate::models::question::{QuestionDraft, QuestionOption, QuestionRecord, OPTION_COUNT};
use crate::services::notifier::{
    Notification, NotificationLevel, Notifier, QUESTIONS_SUBMITTED, QUESTION_ADDED, QUESTION_FAILED,
    QUESTION_TOAST_DURATION,
};
use crate::utils::logging::truncate_text;
use crate::workflow::state::{InFlightReset, QuestionFormState};

/// 添加题目流程
pub struct QuestionBatchWorkflow {
    api: Arc<dyn ExamApi>,
    notifier: Arc<dyn Notifier>,
    state: QuestionFormState,
}

impl QuestionBatchWorkflow {
    pub fn new(api: Arc<dyn ExamApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: QuestionFormState::default(),
        }
    }

    pub fn state(&self) -> &QuestionFormState {
        &self.state
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.state.draft
    }

    pub fn exams(&self) -> &[ExamSummary] {
        &self.state.exams
    }

    pub fn selected_exam(&self) -> Option<&str> {
        self.state.draft.exam_id.as_deref()
    }

    /// 本次会话已添加的题目
    pub fn pending(&self) -> &[QuestionRecord] {
        &self.state.pending
    }

    pub fn pending_count(&self) -> usize {
        self.state.pending.len()
    }

    pub fn can_finalize(&self) -> bool {
        self.state.can_finalize()
    }

    /// 从服务端重新加载考试列表
    ///
    /// # 返回
    /// 返回列表中的考试数量
    pub async fn refresh_exams(&mut self) -> AppResult<usize> {
        let exams = self.api.list_exams().await.map_err(|e| {
            warn!("⚠️ 获取考试列表失败: {}", e);
            AppError::from(e)
        })?;
        self.exams_loaded(exams);
        Ok(self.state.exams.len())
    }

    /// 应用一份已获取的考试列表
    pub fn exams_loaded(&mut self, exams: Vec<ExamSummary>) {
        let previous = self.state.draft.exam_id.clone();
        self.state = self.state.exams_loaded(exams);

        match (previous.as_deref(), self.selected_exam()) {
            (Some(before), after) if Some(before) != after => {
                warn!("⚠️ 已选考试 {} 不在新的考试列表中，改选: {:?}", before, after);
            }
            (None, Some(after)) => info!("默认选中考试: {}", after),
            _ => {}
        }
    }

    pub fn select_exam(&mut self, exam_id: &str) -> AppResult<()> {
        self.state = self.state.select_exam(exam_id)?;
        Ok(())
    }

    pub fn set_question_text(&mut self, text: impl Into<String>) {
        self.state = self.state.set_question_text(text);
    }

    pub fn set_option_text(&mut self, index: usize, text: impl Into<String>) -> AppResult<()> {
        self.state = self.state.set_option_text(index, text)?;
        Ok(())
    }

    pub fn toggle_correct(&mut self, index: usize) -> AppResult<()> {
        self.state = self.state.toggle_correct(index)?;
        Ok(())
    }

    pub fn fill(&mut self, question: impl Into<String>, options: [QuestionOption; OPTION_COUNT]) {
        self.state = self.state.fill(question, options);
    }

    /// 填入一整份草稿后添加
    ///
    /// 草稿里带了考试 ID 时会先切换到该考试
    pub async fn submit_question(&mut self, draft: QuestionDraft) -> AppResult<QuestionRecord> {
        if let Some(exam_id) = draft.exam_id.as_deref() {
            if self.selected_exam() != Some(exam_id) {
                self.select_exam(exam_id)?;
            }
        }
        self.fill(draft.question, draft.options);
        self.add_question().await
    }

    /// 添加当前草稿中的题目
    pub async fn add_question(&mut self) -> AppResult<QuestionRecord> {
        let (in_flight, payload) = match self.state.begin_add() {
            Ok(next) => next,
            Err(AppError::Validation(e)) => {
                warn!("⚠️ 题目未提交: {}", e);
                self.notifier
                    .notify(Notification::alert(NotificationLevel::Error, e.to_string()));
                return Err(e.into());
            }
            Err(e) => return Err(e),
        };
        self.state = in_flight;

        info!(
            "📤 正在提交题目到考试 {}: {}",
            payload.exam_id,
            truncate_text(&payload.question, 80)
        );

        let result = {
            let _reset = InFlightReset::new(&mut self.state.in_flight);
            self.api.create_question(&payload).await
        };

        match result {
            Ok(record) => {
                self.state = self.state.add_succeeded(record.clone());
                info!("✓ 题目提交成功，本批已添加 {} 道", self.pending_count());
                self.notifier.notify(Notification::toast(
                    NotificationLevel::Success,
                    QUESTION_ADDED,
                    QUESTION_TOAST_DURATION,
                ));
                Ok(record)
            }
            Err(e) => {
                self.state = self.state.add_failed();
                warn!("⚠️ 题目提交失败: {}", e);
                self.notifier
                    .notify(Notification::alert(NotificationLevel::Error, QUESTION_FAILED));
                Err(e.into())
            }
        }
    }

    /// 确认本批题目
    ///
    /// 题目在添加时已逐条保存，这里只清空本地列表
    ///
    /// # 返回
    /// 返回被清空的题目
    pub fn finalize_batch(&mut self) -> AppResult<Vec<QuestionRecord>> {
        let next = self.state.finalize()?;
        let confirmed = std::mem::take(&mut self.state.pending);
        self.state = next;

        info!("📋 本批共确认 {} 道题目", confirmed.len());
        self.notifier.notify(Notification::toast(
            NotificationLevel::Info,
            QUESTIONS_SUBMITTED,
            QUESTION_TOAST_DURATION,
        ));
        Ok(confirmed)
    }
}
