//! 单个考试表处理器 - 编排层
//!
//! ## 职责
//!
//! 用两个流程把一张考试表录入服务端，相当于老师先填"创建考试"表单、
//! 再在"添加题目"表单里逐题添加、最后点"全部提交"。
//!
//! ## 核心功能
//!
//! 1. **创建考试**：委托 `ExamCreationWorkflow`
//! 2. **选择考试**：刷新考试列表并选中刚创建的考试
//! 3. **逐题添加**：委托 `QuestionBatchWorkflow`，失败的题目写入失败记录
//! 4. **确认本批**：清空待确认列表
//! 5. **统计输出**：记录成功/失败/跳过数量

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::ExamApi;
use crate::models::sheet::ExamSheet;
use crate::models::question::QuestionDraft;
use crate::orchestrator::sheet_ctx::SheetCtx;
use crate::services::{FailureLog, Notifier};
use crate::utils::logging::truncate_text;
use crate::workflow::{ExamCreationWorkflow, QuestionBatchWorkflow};

/// 单张考试表的处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SheetStats {
    pub exam_created: bool,
    pub added: usize,
    pub failed: usize,
    /// 因考试未创建或无法选中而没有尝试的题目
    pub skipped: usize,
}

/// 处理单张考试表
///
/// # 参数
/// - `api`: 请求层
/// - `notifier`: 通知输出
/// - `failure_log`: 失败记录
/// - `sheet`: 考试表数据
/// - `ctx`: 日志上下文
///
/// # 返回
/// 返回本表的统计；单条失败不会中断整张表
pub async fn process_sheet(
    api: Arc<dyn ExamApi>,
    notifier: Arc<dyn Notifier>,
    failure_log: &FailureLog,
    sheet: ExamSheet,
    ctx: &SheetCtx,
) -> SheetStats {
    let total = sheet.questions.len();
    log_sheet_start(ctx, &sheet);

    let mut stats = SheetStats::default();

    // ========== 第一步：创建考试 ==========
    let mut exam_flow = ExamCreationWorkflow::new(api.clone(), notifier.clone());
    let record = match exam_flow.submit_draft(sheet.exam.clone()).await {
        Ok(record) => record,
        Err(e) => {
            error!("{} ❌ 考试创建失败: {}", ctx, e);
            record_failure(failure_log, ctx, &ctx.sheet_name, &e.to_string());
            stats.skipped = total;
            return stats;
        }
    };
    stats.exam_created = true;

    if total == 0 {
        info!("{} 考试表中没有题目", ctx);
        return stats;
    }

    // ========== 第二步：选中刚创建的考试 ==========
    let mut question_flow = QuestionBatchWorkflow::new(api, notifier);
    let selected = match (question_flow.refresh_exams().await, record.identifier()) {
        (Ok(count), Some(exam_id)) => {
            info!("{} 考试列表共 {} 个考试", ctx, count);
            question_flow.select_exam(exam_id).map_err(|e| e.to_string())
        }
        (Ok(_), None) => Err("服务端没有返回考试标识".to_string()),
        (Err(e), _) => Err(e.to_string()),
    };
    if let Err(reason) = selected {
        error!("{} ❌ 无法选中新建的考试，跳过全部题目: {}", ctx, reason);
        record_failure(failure_log, ctx, &ctx.sheet_name, &reason);
        stats.skipped = total;
        return stats;
    }

    // ========== 第三步：逐题添加 ==========
    for (index, question) in sheet.questions.into_iter().enumerate() {
        let question_index = index + 1;
        info!("{} 处理第 {}/{} 道题目", ctx.prefix(), question_index, total);

        let draft = QuestionDraft {
            question: question.question,
            options: question.options,
            exam_id: None,
        };
        let stem = draft.question.clone();

        match question_flow.submit_question(draft).await {
            Ok(_) => stats.added += 1,
            Err(e) => {
                warn!("{} ⚠️ 第 {} 道题目未添加: {}", ctx.prefix(), question_index, e);
                record_failure(failure_log, ctx, &stem, &e.to_string());
                stats.failed += 1;
            }
        }
    }

    // ========== 第四步：确认本批 ==========
    if question_flow.can_finalize() {
        match question_flow.finalize_batch() {
            Ok(confirmed) => log_confirmed(ctx, &confirmed),
            Err(e) => warn!("{} ⚠️ 确认本批失败: {}", ctx, e),
        }
    }

    if let Some(expected) = record.total_questions {
        if expected as usize != stats.added {
            warn!(
                "{} ⚠️ 考试设定 {} 道题，实际添加 {} 道",
                ctx, expected, stats.added
            );
        }
    }

    log_sheet_complete(ctx, &stats, total);
    stats
}

fn record_failure(failure_log: &FailureLog, ctx: &SheetCtx, item: &str, reason: &str) {
    if let Err(e) = failure_log.write(&ctx.sheet_name, item, reason) {
        error!("{} 写入失败记录失败: {}", ctx, e);
    }
}

// ========== 日志辅助函数 ==========

fn log_sheet_start(ctx: &SheetCtx, sheet: &ExamSheet) {
    info!("{} 开始处理", ctx);
    if let Some(path) = sheet.file_path.as_deref() {
        info!("{} 文件: {}", ctx.prefix(), path);
    }
    info!("{} 题目总数: {}", ctx.prefix(), sheet.questions.len());
}

fn log_confirmed(ctx: &SheetCtx, confirmed: &[crate::models::QuestionRecord]) {
    for (i, record) in confirmed.iter().enumerate() {
        info!(
            "{}   {}. {} (正确选项: {:?})",
            ctx.prefix(),
            i + 1,
            truncate_text(&record.question, 40),
            record.correct_positions()
        );
    }
}

fn log_sheet_complete(ctx: &SheetCtx, stats: &SheetStats, total: usize) {
    info!(
        "{} 题目统计: 成功 {}, 失败 {}, 跳过 {}, 总计 {}",
        ctx.prefix(),
        stats.added,
        stats.failed,
        stats.skipped,
        total
    );
    info!("{} ✅ 考试表处理完成\n", ctx);
}
