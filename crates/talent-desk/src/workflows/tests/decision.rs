use std::sync::Arc;
use std::time::Duration;

use super::common::{pending, question, resume_evaluation, MemoryApi};
use crate::models::Severity;
use crate::notice::NoticeLevel;
use crate::workflows::{
    poll_questions, refresh_pending, CandidateCase, CandidateList, DecisionError, DecisionRecorder,
    JobStatus, LifecycleState, QuestionStatus,
};

#[tokio::test]
async fn approved_candidate_disappears_from_the_queue_after_refresh() {
    let api = Arc::new(MemoryApi::with_pending(vec![
        pending("C_0001", "김민수", true),
        pending("C_0002", "이영희", true),
    ]));
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut queue = CandidateList::new(api.list_pending_now(), 10);
    let mut case = CandidateCase::from_pending(queue.items()[0].clone());

    let outcome = recorder.approve(&mut case).await.expect("approve succeeds");
    refresh_pending(api.as_ref(), &mut queue)
        .await
        .expect("refresh succeeds");

    assert_eq!(outcome.state, LifecycleState::Approved);
    assert_eq!(outcome.notice.level, NoticeLevel::Success);
    assert!(outcome.employee.is_some());
    assert_eq!(case.state(), LifecycleState::Approved);
    assert!(queue
        .items()
        .iter()
        .all(|candidate| candidate.candidate_id.0 != "C_0001"));
    assert_eq!(queue.match_count(), 1);

    let employees = api.employees();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].basic_info.name, "김민수");
    assert!(employees[0].evaluation_data.is_some());
}

#[tokio::test]
async fn approval_deletes_before_creating() {
    let api = Arc::new(MemoryApi::with_pending(vec![pending("C_0001", "김민수", true)]));
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_pending(pending("C_0001", "김민수", true));

    recorder.approve(&mut case).await.expect("approve succeeds");

    assert_eq!(
        api.calls(),
        vec![
            "delete_pending:C_0001".to_string(),
            "create_employee:김민수".to_string(),
        ]
    );
}

#[tokio::test]
async fn failed_employee_creation_is_reported_as_partial() {
    let api = Arc::new(MemoryApi::with_pending(vec![pending("C_0001", "김민수", true)]));
    api.fail("create_employee");
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_pending(pending("C_0001", "김민수", true));

    let err = recorder.approve(&mut case).await.expect_err("approve fails");

    assert!(matches!(err, DecisionError::PartiallyApplied { .. }));
    assert!(err.notice().is_error());
    assert!(err.to_string().contains("removing the pending record"));
    assert_eq!(case.state(), LifecycleState::Evaluated);
    assert!(api.list_pending_now().is_empty());
    assert!(api.employees().is_empty());
}

#[tokio::test]
async fn failed_delete_stops_before_employee_creation() {
    let api = Arc::new(MemoryApi::with_pending(vec![pending("C_0001", "김민수", true)]));
    api.fail("delete_pending");
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_pending(pending("C_0001", "김민수", true));

    let err = recorder.approve(&mut case).await.expect_err("approve fails");

    assert!(matches!(err, DecisionError::Api(_)));
    assert_eq!(api.calls(), vec!["delete_pending:C_0001".to_string()]);
}

#[tokio::test]
async fn unevaluated_pending_candidate_cannot_be_approved() {
    let api = Arc::new(MemoryApi::with_pending(vec![pending("C_0001", "김민수", false)]));
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_pending(pending("C_0001", "김민수", false));

    let err = recorder.approve(&mut case).await.expect_err("approve refused");

    assert!(matches!(
        err,
        DecisionError::InvalidTransition {
            from: LifecycleState::Unevaluated,
            to: LifecycleState::Approved,
        }
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn second_decision_on_the_same_case_is_refused() {
    let api = Arc::new(MemoryApi::with_pending(vec![pending("C_0001", "김민수", true)]));
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_pending(pending("C_0001", "김민수", true));

    recorder.approve(&mut case).await.expect("first approve succeeds");
    let err = recorder
        .approve(&mut case)
        .await
        .expect_err("second approve refused");

    assert!(matches!(
        err,
        DecisionError::InvalidTransition {
            from: LifecycleState::Approved,
            ..
        }
    ));
    assert_eq!(api.employees().len(), 1);
}

#[tokio::test]
async fn rejecting_a_pending_candidate_deletes_the_record() {
    let api = Arc::new(MemoryApi::with_pending(vec![pending("C_0001", "김민수", false)]));
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_pending(pending("C_0001", "김민수", false));

    let outcome = recorder.reject(&mut case).await.expect("reject succeeds");

    assert_eq!(outcome.state, LifecycleState::Rejected);
    assert!(api.list_pending_now().is_empty());
    assert!(api.employees().is_empty());
}

#[tokio::test]
async fn rejecting_an_upload_never_calls_the_server() {
    let api = Arc::new(MemoryApi::default());
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_resume(resume_evaluation("홍길동"));

    let outcome = recorder.reject(&mut case).await.expect("reject succeeds");

    assert_eq!(outcome.notice.level, NoticeLevel::Info);
    assert_eq!(case.state(), LifecycleState::Rejected);
    assert_eq!(case.name(), "");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn approving_an_upload_queues_the_candidate_and_generates_questions() {
    let api = Arc::new(MemoryApi::default());
    api.set_questions(vec![question(
        "React 성능 최적화 경험을 설명해 주세요",
        Severity::High,
    )]);
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_resume(resume_evaluation("홍길동"));

    let outcome = recorder.approve(&mut case).await.expect("approve succeeds");

    let pending = outcome.pending.expect("pending record created");
    assert_eq!(pending.basic_info.name, "홍길동");
    assert!(pending.candidate_id.0.starts_with("C_"));
    let job = outcome.verification_job.expect("job submitted");

    let jobs = recorder.verification_jobs();
    assert_eq!(jobs.candidate(job), Some(pending.candidate_id.clone()));
    let status = jobs
        .wait(job, Duration::from_millis(5), 100)
        .await
        .expect("job known");
    assert!(matches!(status, JobStatus::Completed(ref questions) if questions.len() == 1));

    let calls = api.calls();
    assert_eq!(calls[0], "create_pending:홍길동");
    assert!(calls.contains(&format!("questions:홍길동:{}", pending.candidate_id)));
}

#[tokio::test]
async fn upload_approval_returns_before_questions_are_generated() {
    let api = Arc::new(MemoryApi::default());
    api.set_questions(vec![question("결제 모듈에서 맡은 범위는?", Severity::High)]);
    let gate = api.gate_questions();
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_resume(resume_evaluation("홍길동"));

    let outcome = recorder.approve(&mut case).await.expect("approve succeeds");
    let job = outcome.verification_job.expect("job submitted");
    let candidate_id = outcome.pending.expect("pending record created").candidate_id;

    assert_eq!(case.state(), LifecycleState::Approved);
    assert_eq!(recorder.verification_jobs().status(job), Some(JobStatus::Running));
    assert_eq!(
        poll_questions(api.as_ref(), &candidate_id)
            .await
            .expect("poll succeeds"),
        QuestionStatus::Generating
    );

    gate.add_permits(1);
    let status = recorder
        .verification_jobs()
        .wait(job, Duration::from_millis(5), 100)
        .await
        .expect("job known");
    assert!(matches!(status, JobStatus::Completed(ref questions) if questions.len() == 1));
    assert!(matches!(
        poll_questions(api.as_ref(), &candidate_id)
            .await
            .expect("poll succeeds"),
        QuestionStatus::Ready(ref questions) if questions.len() == 1
    ));
}

#[tokio::test]
async fn failed_question_generation_does_not_undo_the_approval() {
    let api = Arc::new(MemoryApi::default());
    api.fail("questions");
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_resume(resume_evaluation("홍길동"));

    let outcome = recorder.approve(&mut case).await.expect("approve succeeds");
    let job = outcome.verification_job.expect("job submitted");
    let status = recorder
        .verification_jobs()
        .wait(job, Duration::from_millis(5), 100)
        .await
        .expect("job known");

    assert!(matches!(status, JobStatus::Failed(_)));
    assert_eq!(case.state(), LifecycleState::Approved);
    assert_eq!(api.list_pending_now().len(), 1);
}

#[tokio::test]
async fn failed_pending_creation_leaves_the_upload_evaluated() {
    let api = Arc::new(MemoryApi::default());
    api.fail("create_pending");
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::from_resume(resume_evaluation("홍길동"));

    let err = recorder.approve(&mut case).await.expect_err("approve fails");

    assert!(matches!(err, DecisionError::Api(_)));
    assert_eq!(case.state(), LifecycleState::Evaluated);
    assert_eq!(api.calls(), vec!["create_pending:홍길동".to_string()]);
}

#[tokio::test]
async fn upload_without_evaluation_cannot_be_approved() {
    let api = Arc::new(MemoryApi::default());
    let recorder = DecisionRecorder::new(Arc::clone(&api));
    let mut case = CandidateCase::upload();

    let err = recorder.approve(&mut case).await.expect_err("approve refused");

    assert!(matches!(err, DecisionError::InvalidTransition { .. }));
    assert!(api.calls().is_empty());
}
