use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- 考试 API 配置 ---
    /// 服务端基础地址
    pub api_base_url: String,
    /// Bearer token，为空时不发送 Authorization 头
    pub api_token: String,
    pub create_exam_path: String,
    pub list_exams_path: String,
    pub create_question_path: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 批量导入配置 ---
    /// 考试表 TOML 文件存放目录
    pub sheet_folder: String,
    /// 同时处理的考试表数量
    pub max_concurrent_sheets: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 提交失败记录文件
    pub failure_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            api_token: String::new(),
            create_exam_path: "/api/users/exam".to_string(),
            list_exams_path: "/api/users/exam".to_string(),
            create_question_path: "/api/users/exam/questions".to_string(),
            request_timeout_secs: 30,
            sheet_folder: "exam_sheets".to_string(),
            max_concurrent_sheets: 4,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            failure_log_file: "warn.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("EXAM_API_BASE_URL").unwrap_or(default.api_base_url),
            api_token: std::env::var("EXAM_API_TOKEN").unwrap_or(default.api_token),
            create_exam_path: std::env::var("CREATE_EXAM_PATH").unwrap_or(default.create_exam_path),
            list_exams_path: std::env::var("LIST_EXAMS_PATH").unwrap_or(default.list_exams_path),
            create_question_path: std::env::var("CREATE_QUESTION_PATH").unwrap_or(default.create_question_path),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            sheet_folder: std::env::var("SHEET_FOLDER").unwrap_or(default.sheet_folder),
            max_concurrent_sheets: std::env::var("MAX_CONCURRENT_SHEETS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_sheets),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            failure_log_file: std::env::var("FAILURE_LOG_FILE").unwrap_or(default.failure_log_file),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if reqwest::Url::parse(&self.api_base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "EXAM_API_BASE_URL".to_string(),
                value: self.api_base_url.clone(),
                reason: "不是合法的 URL".to_string(),
            });
        }
        if self.max_concurrent_sheets == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_CONCURRENT_SHEETS".to_string(),
                value: "0".to_string(),
                reason: "并发数必须大于 0".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
                reason: "超时必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}
