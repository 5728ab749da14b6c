use thiserror::Error;

use crate::models::exam::FieldError;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 本地校验错误（未发出网络请求）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 服务端没有给出 message 时展示给用户的兜底提示
pub const GENERIC_REQUEST_ERROR: &str = "Request failed. Please try again.";

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// API 返回空结果（缺少标识等）
    #[error("API返回空结果: {endpoint}")]
    EmptyResponse { endpoint: String },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// 面向用户的提示：优先使用服务端 message，否则使用通用提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadResponse {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_REQUEST_ERROR.to_string(),
        }
    }
}

/// 本地校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 考试表单字段校验失败（每个字段最多一条）
    #[error("考试表单校验失败: {}", join_field_errors(.0))]
    Exam(Vec<FieldError>),
    /// 题干或选项为空
    #[error("Please fill out the question and all options.")]
    IncompleteQuestion,
    /// 尚未选择考试
    #[error("Please select an exam first.")]
    NoExamSelected,
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message())
        .collect::<Vec<_>>()
        .join("; ")
}

/// 业务逻辑错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessError {
    /// 已有请求在进行中
    #[error("已有提交正在进行中")]
    SubmitInFlight,
    /// 考试不在已加载的列表中
    #[error("考试 {exam_id} 不在已加载的考试列表中")]
    UnknownExam { exam_id: String },
    /// 待确认列表为空
    #[error("没有待确认的题目")]
    EmptyBatch,
    /// 选项索引超出范围
    #[error("选项索引 {index} 超出范围 [0, {max_index}]")]
    OptionIndexOutOfRange { index: usize, max_index: usize },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 配置值不可用
    #[error("配置项 {name} 无效: '{value}' ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
