//! 批量考试表处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量考试表的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、初始化日志文件、创建 HTTP 客户端
//! 2. **批量加载**：扫描并加载所有考试表（`Vec<ExamSheet>`）
//! 3. **并发控制**：使用 Semaphore 限制同时处理的考试表数量
//! 4. **全局统计**：汇总所有考试表的处理结果
//!
//! 每张考试表拥有自己的一对流程实例，流程状态不会跨任务共享。

use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::clients::{ExamApi, HttpExamClient};
use crate::config::Config;
use crate::models::ExamSheet;
use crate::orchestrator::sheet_ctx::SheetCtx;
use crate::orchestrator::sheet_processor::{process_sheet, SheetStats};
use crate::services::{FailureLog, Notifier, TracingNotifier};
use crate::utils::logging::{init_log_file, log_sheets_loaded, log_startup, print_final_stats};

/// 全部考试表的处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub sheets: usize,
    pub exams_created: usize,
    pub questions_added: usize,
    pub questions_failed: usize,
    pub questions_skipped: usize,
}

impl ProcessingStats {
    pub fn absorb(&mut self, sheet: &SheetStats) {
        if sheet.exam_created {
            self.exams_created += 1;
        }
        self.questions_added += sheet.added;
        self.questions_failed += sheet.failed;
        self.questions_skipped += sheet.skipped;
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    api: Arc<dyn ExamApi>,
    failure_log: Arc<FailureLog>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置无效")?;

        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let api: Arc<dyn ExamApi> =
            Arc::new(HttpExamClient::new(&config).context("无法创建 HTTP 客户端")?);

        Ok(Self::with_api(config, api))
    }

    /// 使用指定的请求层创建应用（不做 IO）
    pub fn with_api(config: Config, api: Arc<dyn ExamApi>) -> Self {
        let failure_log = Arc::new(FailureLog::new(config.failure_log_file.clone()));
        Self {
            config,
            api,
            failure_log,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        // 加载所有考试表
        let sheets = self.load_sheets().await?;

        if sheets.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_sheets_loaded(sheets.len(), self.config.max_concurrent_sheets);

        let stats = self.process_all_sheets(sheets).await?;

        print_final_stats(&stats, &self.config.output_log_file, self.failure_log.path());

        Ok(stats)
    }

    /// 加载考试表
    async fn load_sheets(&self) -> Result<Vec<ExamSheet>> {
        info!("\n📁 正在扫描待处理的考试表...");
        let sheets = crate::models::load_all_sheets(&self.config.sheet_folder)
            .await
            .with_context(|| format!("无法加载考试表目录: {}", self.config.sheet_folder))?;
        Ok(sheets)
    }

    /// 并发处理所有考试表
    pub async fn process_all_sheets(&self, sheets: Vec<ExamSheet>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_sheets));
        let mut stats = ProcessingStats {
            sheets: sheets.len(),
            ..Default::default()
        };

        let mut handles = Vec::with_capacity(sheets.len());
        for (idx, sheet) in sheets.into_iter().enumerate() {
            let ctx = SheetCtx::new(idx + 1, sheet.display_name());
            let permit = semaphore.clone().acquire_owned().await?;
            let api = self.api.clone();
            let failure_log = self.failure_log.clone();
            let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier::with_prefix(ctx.prefix()));

            let handle = tokio::spawn(async move {
                let _permit = permit;
                process_sheet(api, notifier, &failure_log, sheet, &ctx).await
            });
            handles.push((idx + 1, handle));
        }

        let (indices, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        for (sheet_index, joined) in indices.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(sheet_stats) => stats.absorb(&sheet_stats),
                Err(e) => error!("[考试表 {}] 任务执行失败: {}", sheet_index, e),
            }
        }

        Ok(stats)
    }
}
