//! # Exam Authoring
//!
//! 考试录入客户端：创建考试、为考试逐题添加选择题
//!
//! ## 架构设计
//!
//! ### ① 请求层（Clients）
//! - `clients/` - 与服务端交互，只暴露 `ExamApi` 能力
//! - `HttpExamClient` - 基于 reqwest 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `validate_exam` / `validate_question` - 本地校验
//! - `Notifier` - 用户通知
//! - `FailureLog` - 写失败记录
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 两个互不依赖的表单流程
//! - `ExamCreationWorkflow` - 校验 → 创建考试 → 重置
//! - `QuestionBatchWorkflow` - 选考试 → 逐题添加 → 确认本批
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量考试表处理，管理并发
//! - `orchestrator/sheet_processor` - 单张考试表的录入
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ExamApi, HttpExamClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ExamDraft, ExamSheet, QuestionDraft, QuestionOption, QuestionRecord};
pub use orchestrator::App;
pub use workflow::{ExamCreationWorkflow, QuestionBatchWorkflow};
