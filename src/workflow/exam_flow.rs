//! 创建考试流程 - 流程层
//!
//! 流程顺序：校验 → 创建请求 → 成功则重置表单 / 失败则保留输入

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::ExamApi;
use crate::error::AppResult;
use crate::models::exam::{ExamDraft, ExamField, ExamRecord};
use crate::services::notifier::{Notification, NotificationLevel, Notifier, DEFAULT_TOAST_DURATION, EXAM_CREATED};
use crate::workflow::state::{ExamFormState, InFlightReset};

/// 创建考试流程
///
/// - 持有自己的表单状态，不与其他流程共享
/// - 只依赖请求层（ExamApi）和通知能力（Notifier）
pub struct ExamCreationWorkflow {
    api: Arc<dyn ExamApi>,
    notifier: Arc<dyn Notifier>,
    state: ExamFormState,
}

impl ExamCreationWorkflow {
    pub fn new(api: Arc<dyn ExamApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: ExamFormState::default(),
        }
    }

    pub fn state(&self) -> &ExamFormState {
        &self.state
    }

    pub fn draft(&self) -> &ExamDraft {
        &self.state.draft
    }

    pub fn set_field(&mut self, field: ExamField, value: impl Into<String>) {
        self.state = self.state.edit(field, value);
    }

    pub fn load_draft(&mut self, draft: ExamDraft) {
        self.state = self.state.replace_draft(draft);
    }

    /// 填入整份草稿后提交
    pub async fn submit_draft(&mut self, draft: ExamDraft) -> AppResult<ExamRecord> {
        self.load_draft(draft);
        self.submit().await
    }

    /// 提交当前草稿
    ///
    /// 校验失败或已有请求在途时不会发出请求，草稿保持不变
    pub async fn submit(&mut self) -> AppResult<ExamRecord> {
        let (in_flight, payload) = match self.state.begin_submit() {
            Ok(next) => next,
            Err(e) => {
                warn!("⚠️ 考试未提交: {}", e);
                return Err(e);
            }
        };
        self.state = in_flight;

        info!("📤 正在创建考试: {}", payload.exam_name);

        let result = {
            let _reset = InFlightReset::new(&mut self.state.in_flight);
            self.api.create_exam(&payload).await
        };

        match result {
            Ok(record) => {
                self.state = self.state.submit_succeeded();
                info!(
                    "✓ 考试创建成功: {} (ID: {})",
                    payload.exam_name,
                    record.identifier().unwrap_or("-")
                );
                self.notifier.notify(Notification::toast(
                    NotificationLevel::Success,
                    EXAM_CREATED,
                    DEFAULT_TOAST_DURATION,
                ));
                Ok(record)
            }
            Err(e) => {
                self.state = self.state.submit_failed();
                warn!("⚠️ 考试创建失败: {}", e);
                self.notifier.notify(Notification::toast(
                    NotificationLevel::Error,
                    e.user_message(),
                    DEFAULT_TOAST_DURATION,
                ));
                Err(e.into())
            }
        }
    }
}
