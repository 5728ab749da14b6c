pub mod exam;
pub mod loaders;
pub mod question;
pub mod sheet;

pub use exam::{ExamDraft, ExamField, ExamPayload, ExamRecord, ExamSummary, FieldError, ValidationKind};
pub use loaders::{load_all_sheets, load_sheet};
pub use question::{QuestionDraft, QuestionOption, QuestionPayload, QuestionRecord, OPTION_COUNT};
pub use sheet::{ExamSheet, SheetQuestion};
