//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<ExamSheet>)
//!     ↓
//! sheet_processor (处理一张考试表)
//!     ↓
//! workflow::{ExamCreationWorkflow, QuestionBatchWorkflow}
//!     ↓
//! services (能力层：校验 / 通知 / 失败记录)
//!     ↓
//! clients (请求层：ExamApi)
//! ```

pub mod batch_processor;
pub mod sheet_ctx;
pub mod sheet_processor;

pub use batch_processor::{App, ProcessingStats};
pub use sheet_ctx::SheetCtx;
pub use sheet_processor::{process_sheet, SheetStats};
