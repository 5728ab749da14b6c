mod common;

use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

use common::MockApi;
use exam_authoring::error::{AppError, BusinessError, ValidationError, GENERIC_REQUEST_ERROR};
use exam_authoring::models::{
    ExamDraft, ExamField, ExamPayload, ExamSummary, QuestionDraft, QuestionOption, ValidationKind,
};
use exam_authoring::services::notifier::{
    NotificationLevel, Presentation, EXAM_CREATED, QUESTIONS_SUBMITTED, QUESTION_ADDED,
    QUESTION_FAILED, QUESTION_TOAST_DURATION,
};
use exam_authoring::services::MemoryNotifier;
use exam_authoring::{ExamCreationWorkflow, QuestionBatchWorkflow};

fn midterm() -> ExamDraft {
    ExamDraft::new("Midterm", "10", "60", "2025-01-01T09:00", "2025-01-02T09:00")
}

fn arithmetic_options() -> [QuestionOption; 4] {
    [
        QuestionOption::new("3", false),
        QuestionOption::new("4", true),
        QuestionOption::new("5", false),
        QuestionOption::new("6", false),
    ]
}

fn exam_flow(api: &Arc<MockApi>, notifier: &Arc<MemoryNotifier>) -> ExamCreationWorkflow {
    ExamCreationWorkflow::new(api.clone(), notifier.clone())
}

async fn question_flow(api: &Arc<MockApi>, notifier: &Arc<MemoryNotifier>) -> QuestionBatchWorkflow {
    let mut flow = QuestionBatchWorkflow::new(api.clone(), notifier.clone());
    assert_ok!(flow.refresh_exams().await);
    flow
}

fn two_exams() -> Arc<MockApi> {
    Arc::new(MockApi::with_exams(vec![
        ExamSummary::new("E1", "Midterm"),
        ExamSummary::new("E2", "Final"),
    ]))
}

// ========== 创建考试 ==========

#[tokio::test]
async fn midterm_is_sent_once_and_form_resets() {
    let api = Arc::new(MockApi::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = exam_flow(&api, &notifier);

    let record = assert_ok!(flow.submit_draft(midterm()).await);
    assert_eq!(record.exam_name.as_deref(), Some("Midterm"));

    assert_eq!(
        api.exam_calls(),
        vec![ExamPayload {
            exam_name: "Midterm".to_string(),
            total_questions: 10,
            duration: 60,
            live_date: "2025-01-01T09:00".to_string(),
            dead_date: "2025-01-02T09:00".to_string(),
        }]
    );
    assert_eq!(flow.draft(), &ExamDraft::default());
    assert!(!flow.state().in_flight);

    let notes = notifier.take();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Success);
    assert_eq!(notes[0].message, EXAM_CREATED);
}

#[tokio::test]
async fn any_blank_required_field_blocks_the_request() {
    for field in ExamField::ALL {
        let api = Arc::new(MockApi::default());
        let notifier = Arc::new(MemoryNotifier::new());
        let mut flow = exam_flow(&api, &notifier);

        let draft = midterm().with_field(field, "");
        let err = assert_err!(flow.submit_draft(draft.clone()).await);

        match err {
            AppError::Validation(ValidationError::Exam(errors)) => {
                assert_eq!(errors.len(), 1, "{field:?}");
                assert_eq!(errors[0].field, field);
                assert_eq!(errors[0].kind, ValidationKind::Required);
            }
            other => panic!("unexpected error for {field:?}: {other:?}"),
        }
        assert!(api.exam_calls().is_empty());
        assert_eq!(flow.draft(), &draft);
        assert!(notifier.snapshot().is_empty());
    }
}

#[tokio::test]
async fn field_edits_build_the_draft() {
    let api = Arc::new(MockApi::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = exam_flow(&api, &notifier);

    flow.set_field(ExamField::ExamName, "Quiz 3");
    flow.set_field(ExamField::TotalQuestions, "5");
    flow.set_field(ExamField::Duration, "0.5");
    flow.set_field(ExamField::LiveDate, "2025-05-01 08:00");
    flow.set_field(ExamField::DeadDate, "2025-05-01 09:00");

    let err = assert_err!(flow.submit().await);
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::Exam(ref errors))
            if errors.len() == 1 && errors[0].kind == ValidationKind::NotInteger
    ));

    flow.set_field(ExamField::Duration, "30");
    assert_ok!(flow.submit().await);
    assert_eq!(api.exam_calls()[0].duration, 30);
}

#[tokio::test]
async fn server_rejection_keeps_draft_and_shows_server_message() {
    let api = Arc::new(MockApi {
        exam_failure: Some((409, Some("Exam name already exists".to_string()))),
        ..MockApi::default()
    });
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = exam_flow(&api, &notifier);

    let err = assert_err!(flow.submit_draft(midterm()).await);
    assert!(matches!(err, AppError::Api(_)));
    assert_eq!(flow.draft(), &midterm());
    assert!(!flow.state().in_flight);

    let notes = notifier.take();
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].message, "Exam name already exists");

    // 用户可以直接重试
    assert_err!(flow.submit().await);
    assert_eq!(api.exam_calls().len(), 2);
}

#[tokio::test]
async fn server_rejection_without_message_uses_generic_text() {
    let api = Arc::new(MockApi {
        exam_failure: Some((500, None)),
        ..MockApi::default()
    });
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = exam_flow(&api, &notifier);

    assert_err!(flow.submit_draft(midterm()).await);
    assert_eq!(notifier.take()[0].message, GENERIC_REQUEST_ERROR);
}

#[tokio::test]
async fn cancelled_exam_request_does_not_block_the_form() {
    let api = Arc::new(MockApi::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = exam_flow(&api, &notifier);

    api.delay_next_call(Duration::from_secs(5));
    flow.load_draft(midterm());
    let cancelled = tokio::time::timeout(Duration::from_millis(50), flow.submit()).await;
    assert!(cancelled.is_err());

    assert!(!flow.state().in_flight);
    assert!(flow.state().can_submit());
    assert_eq!(flow.draft(), &midterm());

    assert_ok!(flow.submit().await);
    assert_eq!(api.exam_calls().len(), 2);
    assert_eq!(flow.draft(), &ExamDraft::default());
}

// ========== 添加题目 ==========

#[tokio::test]
async fn first_exam_is_selected_after_loading() {
    let api = two_exams();
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = question_flow(&api, &notifier).await;

    assert_eq!(flow.selected_exam(), Some("E1"));
    assert_ok!(flow.select_exam("E2"));

    // 再次刷新不覆盖手动选择
    assert_ok!(flow.refresh_exams().await);
    assert_eq!(flow.selected_exam(), Some("E2"));
    assert_eq!(*api.list_calls.lock().unwrap(), 2);

    let err = assert_err!(flow.select_exam("E9"));
    assert!(matches!(
        err,
        AppError::Business(BusinessError::UnknownExam { ref exam_id }) if exam_id == "E9"
    ));
    assert_eq!(flow.selected_exam(), Some("E2"));
}

#[tokio::test]
async fn arithmetic_question_is_sent_and_appended() {
    let api = two_exams();
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = question_flow(&api, &notifier).await;

    let draft = QuestionDraft {
        question: "2+2=?".to_string(),
        options: arithmetic_options(),
        exam_id: Some("E1".to_string()),
    };
    let record = assert_ok!(flow.submit_question(draft).await);

    let calls = api.question_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].question, "2+2=?");
    assert_eq!(calls[0].exam_id, "E1");
    assert_eq!(calls[0].options, arithmetic_options());

    assert_eq!(flow.pending_count(), 1);
    assert_eq!(flow.pending()[0], record);

    let notes = notifier.take();
    assert_eq!(notes[0].message, QUESTION_ADDED);
    assert_eq!(
        notes[0].presentation,
        Presentation::Toast {
            auto_close: QUESTION_TOAST_DURATION
        }
    );
}

#[tokio::test]
async fn success_resets_text_and_flags_but_keeps_exam() {
    let api = two_exams();
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = question_flow(&api, &notifier).await;
    assert_ok!(flow.select_exam("E2"));

    for (i, stem) in ["first", "second", "third"].into_iter().enumerate() {
        flow.set_question_text(stem);
        for (index, text) in ["a", "b", "c", "d"].into_iter().enumerate() {
            assert_ok!(flow.set_option_text(index, text));
        }
        assert_ok!(flow.toggle_correct(i % 4));
        assert_ok!(flow.add_question().await);

        let draft = flow.draft();
        assert_eq!(draft.question, "");
        assert!(draft.options.iter().all(|o| o.option_text.is_empty()));
        assert!(draft.options.iter().all(|o| !o.is_correct));
        assert_eq!(draft.exam_id.as_deref(), Some("E2"));
    }

    let order: Vec<_> = flow.pending().iter().map(|r| r.question.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
    assert_eq!(flow.pending()[1].correct_positions(), vec![2]);
}

#[tokio::test]
async fn incomplete_question_never_reaches_the_server() {
    let api = two_exams();
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = question_flow(&api, &notifier).await;

    let mut blank_option = arithmetic_options();
    blank_option[3].option_text = " ".to_string();

    for (question, options) in [
        ("", arithmetic_options()),
        ("2+2=?", blank_option),
        ("  ", Default::default()),
    ] {
        flow.fill(question, options.clone());
        let before = flow.state().clone();

        let err = assert_err!(flow.add_question().await);
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::IncompleteQuestion)
        ));
        assert_eq!(flow.state(), &before);
    }

    assert!(api.question_calls().is_empty());
    let notes = notifier.take();
    assert_eq!(notes.len(), 3);
    assert!(notes
        .iter()
        .all(|n| n.presentation == Presentation::Alert
            && n.message == "Please fill out the question and all options."));
}

#[tokio::test]
async fn no_exam_loaded_blocks_the_request() {
    let api = Arc::new(MockApi::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = question_flow(&api, &notifier).await;

    flow.fill("2+2=?", arithmetic_options());
    let err = assert_err!(flow.add_question().await);
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::NoExamSelected)
    ));
    assert!(api.question_calls().is_empty());
}

#[tokio::test]
async fn server_failure_leaves_draft_and_list_alone() {
    let api = Arc::new(MockApi {
        reject_question_containing: Some("boom".to_string()),
        ..MockApi::with_exams(vec![ExamSummary::new("E1", "Midterm")])
    });
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = question_flow(&api, &notifier).await;

    flow.fill("ok", arithmetic_options());
    assert_ok!(flow.add_question().await);
    notifier.take();

    flow.fill("boom", arithmetic_options());
    let before = flow.state().clone();
    let err = assert_err!(flow.add_question().await);
    assert!(matches!(err, AppError::Api(_)));

    assert_eq!(flow.state(), &before);
    assert_eq!(flow.pending_count(), 1);

    let notes = notifier.take();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].presentation, Presentation::Alert);
    assert_eq!(notes[0].message, QUESTION_FAILED);
}

#[tokio::test]
async fn finalize_clears_pending_without_network() {
    let api = two_exams();
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = question_flow(&api, &notifier).await;

    assert!(!flow.can_finalize());
    let err = assert_err!(flow.finalize_batch());
    assert!(matches!(err, AppError::Business(BusinessError::EmptyBatch)));
    assert!(notifier.snapshot().is_empty());

    for stem in ["one", "two"] {
        flow.fill(stem, arithmetic_options());
        assert_ok!(flow.add_question().await);
    }
    flow.set_question_text("draft in progress");
    assert_ok!(flow.toggle_correct(0));
    notifier.take();

    let calls_before = api.question_calls().len();
    let confirmed = assert_ok!(flow.finalize_batch());

    assert_eq!(confirmed.len(), 2);
    assert_eq!(flow.pending_count(), 0);
    assert_eq!(flow.draft().question, "");
    assert!(flow.draft().options.iter().all(|o| !o.is_correct));
    assert_eq!(flow.selected_exam(), Some("E1"));
    assert_eq!(api.question_calls().len(), calls_before);

    let notes = notifier.take();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Info);
    assert_eq!(notes[0].message, QUESTIONS_SUBMITTED);
}

#[tokio::test]
async fn cancelled_question_request_does_not_block_the_form() {
    let api = two_exams();
    let notifier = Arc::new(MemoryNotifier::new());
    let mut flow = question_flow(&api, &notifier).await;

    api.delay_next_call(Duration::from_secs(5));
    flow.fill("2+2=?", arithmetic_options());
    let cancelled = tokio::time::timeout(Duration::from_millis(50), flow.add_question()).await;
    assert!(cancelled.is_err());

    assert!(!flow.state().in_flight);
    assert!(flow.state().can_add());
    assert_eq!(flow.pending_count(), 0);
    assert_eq!(flow.draft().question, "2+2=?");

    assert_ok!(flow.add_question().await);
    assert_eq!(flow.pending_count(), 1);
    assert_eq!(api.question_calls().len(), 2);
}
