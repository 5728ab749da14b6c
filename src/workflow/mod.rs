pub mod exam_flow;
pub mod question_flow;
pub mod state;

pub use exam_flow::ExamCreationWorkflow;
pub use question_flow::QuestionBatchWorkflow;
pub use state::{ExamFormState, QuestionFormState};
