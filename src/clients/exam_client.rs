//! 考试 API 客户端
//!
//! 封装所有与考试服务端相关的调用逻辑

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::exam::{ExamPayload, ExamRecord, ExamSummary};
use crate::models::question::{QuestionPayload, QuestionRecord};

/// 服务端请求层
///
/// 流程层只依赖这个 trait，测试里可以换成内存实现
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// 创建考试
    async fn create_exam(&self, payload: &ExamPayload) -> Result<ExamRecord, ApiError>;
    /// 创建题目
    async fn create_question(&self, payload: &QuestionPayload) -> Result<QuestionRecord, ApiError>;
    /// 获取考试列表
    async fn list_exams(&self) -> Result<Vec<ExamSummary>, ApiError>;
}

/// 基于 HTTP 的考试 API 客户端
pub struct HttpExamClient {
    client: Client,
    base_url: String,
    token: String,
    create_exam_path: String,
    list_exams_path: String,
    create_question_path: String,
}

impl HttpExamClient {
    /// 创建新的考试 API 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed("<client builder>", e))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            create_exam_path: config.create_exam_path.clone(),
            list_exams_path: config.list_exams_path.clone(),
            create_question_path: config.create_question_path.clone(),
        })
    }

    /// 拼接完整 URL
    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .header("Accept", "application/json, text/plain, */*")
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::RequestFailed {
                endpoint: path.to_string(),
                source,
            })?;

        read_response(path, response).await
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(&url))
            .header("Accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|source| ApiError::RequestFailed {
                endpoint: path.to_string(),
                source,
            })?;

        read_response(path, response).await
    }
}

#[async_trait]
impl ExamApi for HttpExamClient {
    async fn create_exam(&self, payload: &ExamPayload) -> Result<ExamRecord, ApiError> {
        let record: ExamRecord = self.post_json(&self.create_exam_path, payload).await?;
        if record.identifier().is_none() {
            return Err(ApiError::EmptyResponse {
                endpoint: self.create_exam_path.clone(),
            });
        }
        debug!("创建考试结果: {:?}", record);
        Ok(record)
    }

    async fn create_question(&self, payload: &QuestionPayload) -> Result<QuestionRecord, ApiError> {
        let record: QuestionRecord = self.post_json(&self.create_question_path, payload).await?;
        debug!("创建题目结果: {:?}", record);
        Ok(record)
    }

    async fn list_exams(&self) -> Result<Vec<ExamSummary>, ApiError> {
        self.get_json(&self.list_exams_path).await
    }
}

/// 读取响应：非 2xx 时尽量取出服务端的 message
async fn read_response<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ApiError::RequestFailed {
            endpoint: endpoint.to_string(),
            source,
        })?;

    if !status.is_success() {
        return Err(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message: extract_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| ApiError::JsonParseFailed {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// 从错误响应体中提取 `message` 字段
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
