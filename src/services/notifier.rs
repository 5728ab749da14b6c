//! 用户通知 - 业务能力层
//!
//! 流程层只产出 `Notification`，怎么展示（弹窗、toast、日志）由 `Notifier` 决定

use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info};

/// toast 默认自动关闭时间
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);
/// 题目相关 toast 的自动关闭时间
pub const QUESTION_TOAST_DURATION: Duration = Duration::from_millis(3000);

pub const EXAM_CREATED: &str = "Exam Created successfully";
pub const QUESTION_ADDED: &str = "Question added successfully!";
pub const QUESTION_FAILED: &str = "Failed to create question. Please try again.";
pub const QUESTIONS_SUBMITTED: &str = "Questions submitted successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// 展示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// 定时自动消失
    Toast { auto_close: Duration },
    /// 阻塞式弹窗，需要用户确认
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub presentation: Presentation,
    pub message: String,
}

impl Notification {
    pub fn toast(level: NotificationLevel, message: impl Into<String>, auto_close: Duration) -> Self {
        Self {
            level,
            presentation: Presentation::Toast { auto_close },
            message: message.into(),
        }
    }

    pub fn alert(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            presentation: Presentation::Alert,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// 把通知写进日志，命令行模式下使用
#[derive(Debug, Default)]
pub struct TracingNotifier {
    /// 日志前缀，例如 "[考试表 2]"
    prefix: String,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let tag = match notification.presentation {
            Presentation::Alert => "弹窗",
            Presentation::Toast { .. } => "提示",
        };
        match notification.level {
            NotificationLevel::Success => {
                info!("{} ✅ [{}] {}", self.prefix, tag, notification.message)
            }
            NotificationLevel::Info => {
                info!("{} 💡 [{}] {}", self.prefix, tag, notification.message)
            }
            NotificationLevel::Error => {
                error!("{} ❌ [{}] {}", self.prefix, tag, notification.message)
            }
        }
    }
}

/// 把通知留在内存里，供界面轮询或测试断言
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前已收到的全部通知
    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// 取出并清空已收到的通知
    pub fn take(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.notifications.lock() {
            guard.push(notification);
        }
    }
}
