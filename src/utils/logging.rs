//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use crate::config::Config;
use crate::orchestrator::ProcessingStats;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n考试录入日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 考试批量录入模式");
    info!("🌐 服务端: {}", config.api_base_url);
    info!("📊 最大并发数: {}", config.max_concurrent_sheets);
    info!("{}", "=".repeat(60));
}

/// 记录考试表加载信息
///
/// # 参数
/// - `total`: 考试表总数
/// - `max_concurrent`: 最大并发数
pub fn log_sheets_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的考试表", total);
    info!("📋 最多同时处理 {} 个\n", max_concurrent);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &ProcessingStats, log_file_path: &str, failure_log_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 考试创建: {}/{}", stats.exams_created, stats.sheets);
    info!("✅ 题目添加: {}", stats.questions_added);
    info!("❌ 题目失败: {}", stats.questions_failed);
    info!("⏭️ 题目跳过: {}", stats.questions_skipped);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
    if stats.questions_failed + stats.questions_skipped > 0 || stats.exams_created < stats.sheets {
        info!("失败记录见: {}", failure_log_path);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
