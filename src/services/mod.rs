pub mod exam_validator;
pub mod failure_log;
pub mod notifier;
pub mod question_validator;

pub use exam_validator::validate_exam;
pub use failure_log::FailureLog;
pub use notifier::{MemoryNotifier, Notification, NotificationLevel, Notifier, Presentation, TracingNotifier};
pub use question_validator::validate_question;
