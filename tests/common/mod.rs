#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use exam_authoring::error::ApiError;
use exam_authoring::models::{
    ExamPayload, ExamRecord, ExamSummary, QuestionPayload, QuestionRecord,
};
use exam_authoring::ExamApi;

/// 内存中的请求层，记录每一次调用
#[derive(Default)]
pub struct MockApi {
    pub exam_calls: Mutex<Vec<ExamPayload>>,
    pub question_calls: Mutex<Vec<QuestionPayload>>,
    pub list_calls: Mutex<usize>,
    pub exams: Mutex<Vec<ExamSummary>>,
    /// 设置后 create_exam 返回该状态码和 message
    pub exam_failure: Option<(u16, Option<String>)>,
    /// 题干包含该文本时 create_question 失败
    pub reject_question_containing: Option<String>,
    /// 创建考试成功后不把它加入考试列表
    pub hide_created_exams: bool,
    /// 下一次创建请求在返回前等待的时间（只生效一次）
    pub next_call_delay: Mutex<Option<Duration>>,
}

impl MockApi {
    pub fn with_exams(exams: Vec<ExamSummary>) -> Self {
        Self {
            exams: Mutex::new(exams),
            ..Self::default()
        }
    }

    pub fn exam_calls(&self) -> Vec<ExamPayload> {
        self.exam_calls.lock().unwrap().clone()
    }

    pub fn question_calls(&self) -> Vec<QuestionPayload> {
        self.question_calls.lock().unwrap().clone()
    }

    pub fn delay_next_call(&self, delay: Duration) {
        *self.next_call_delay.lock().unwrap() = Some(delay);
    }

    async fn pause_if_requested(&self) {
        let delay = self.next_call_delay.lock().unwrap().take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ExamApi for MockApi {
    async fn create_exam(&self, payload: &ExamPayload) -> Result<ExamRecord, ApiError> {
        let count = {
            let mut calls = self.exam_calls.lock().unwrap();
            calls.push(payload.clone());
            calls.len()
        };
        self.pause_if_requested().await;

        if let Some((status, message)) = &self.exam_failure {
            return Err(ApiError::BadResponse {
                endpoint: "/api/users/exam".to_string(),
                status: *status,
                message: message.clone(),
            });
        }

        let exam_id = format!("exam-{count}");
        if !self.hide_created_exams {
            self.exams
                .lock()
                .unwrap()
                .push(ExamSummary::new(exam_id.clone(), payload.exam_name.clone()));
        }

        Ok(ExamRecord {
            id: Some(format!("mongo-{count}")),
            exam_id: Some(exam_id),
            exam_name: Some(payload.exam_name.clone()),
            total_questions: Some(payload.total_questions),
            duration: Some(payload.duration),
            live_date: Some(payload.live_date.clone()),
            dead_date: Some(payload.dead_date.clone()),
        })
    }

    async fn create_question(&self, payload: &QuestionPayload) -> Result<QuestionRecord, ApiError> {
        let count = {
            let mut calls = self.question_calls.lock().unwrap();
            calls.push(payload.clone());
            calls.len()
        };
        self.pause_if_requested().await;

        if let Some(needle) = &self.reject_question_containing {
            if payload.question.contains(needle.as_str()) {
                return Err(ApiError::BadResponse {
                    endpoint: "/api/users/exam/questions".to_string(),
                    status: 500,
                    message: Some("database unavailable".to_string()),
                });
            }
        }

        Ok(QuestionRecord {
            id: Some(format!("question-{count}")),
            question: payload.question.clone(),
            options: payload.options.to_vec(),
            exam_id: Some(payload.exam_id.clone()),
        })
    }

    async fn list_exams(&self) -> Result<Vec<ExamSummary>, ApiError> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self.exams.lock().unwrap().clone())
    }
}
