use std::sync::Once;

use board_core::{
    update, AppState, Effect, FormInput, JobState, Msg, ResultRecord, ScrapeFailure, Tab,
    Visibility, PRIVATE_BOARD_MESSAGE, SERVICE_FALLBACK_MESSAGE, TRANSPORT_FAILURE_MESSAGE,
};
use url::Url;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(board_logging::initialize_for_tests);
}

fn form(board: &str) -> FormInput {
    FormInput::new(Url::parse(board).unwrap())
}

fn pin(title: &str) -> ResultRecord {
    ResultRecord {
        title: Some(title.to_string()),
        url: Some("http://x".to_string()),
        image: Some("http://y".to_string()),
        ..ResultRecord::default()
    }
}

fn submit(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::SubmitClicked(form("https://pinterest.com/u/b/")));
    let job_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitScrape { job_id, .. } => Some(*job_id),
            _ => None,
        })
        .expect("submit effect");
    (state, job_id)
}

#[test]
fn public_submission_moves_to_submitting_with_one_effect() {
    init_logging();
    let (mut state, effects) =
        update(AppState::new(), Msg::SubmitClicked(form("https://pinterest.com/u/b/")));

    assert_eq!(state.job(), &JobState::Submitting { job_id: 1 });
    assert!(!state.can_submit());
    assert!(state.consume_dirty());
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::SubmitScrape { job_id, request } => {
            assert_eq!(*job_id, 1);
            assert_eq!(request.board_url().as_str(), "https://pinterest.com/u/b/");
            assert!(request.is_public());
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn private_submission_never_submits() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::VisibilityChanged(Visibility::Private));
    let (state, effects) = update(state, Msg::SubmitClicked(form("https://pinterest.com/u/b/")));

    assert!(effects.is_empty());
    assert_eq!(state.job(), &JobState::Idle);
    assert_eq!(state.message().as_deref(), Some(PRIVATE_BOARD_MESSAGE));
}

#[test]
fn private_submission_keeps_previous_results() {
    init_logging();
    let (state, job_id) = submit(AppState::new());
    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Ok(vec![pin("A")]),
        },
    );
    let (state, _) = update(state, Msg::VisibilityChanged(Visibility::Private));
    let (state, effects) = update(state, Msg::SubmitClicked(form("https://pinterest.com/u/b/")));

    assert!(effects.is_empty());
    assert_eq!(state.job(), &JobState::Succeeded(vec![pin("A")]));
    assert_eq!(state.message().as_deref(), Some(PRIVATE_BOARD_MESSAGE));
}

#[test]
fn successful_scrape_holds_results_and_switches_to_results_tab() {
    init_logging();
    let (state, job_id) = submit(AppState::new());
    assert_eq!(state.active_tab(), Tab::Scrape);

    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Ok(vec![pin("A")]),
        },
    );

    assert_eq!(state.job(), &JobState::Succeeded(vec![pin("A")]));
    assert_eq!(state.active_tab(), Tab::Results);
    assert_eq!(state.message(), None);
    assert!(state.can_submit());
    assert_eq!(
        effects,
        vec![Effect::JobCompleted {
            job_id,
            pin_count: 1
        }]
    );
}

#[test]
fn service_failure_uses_detail_verbatim() {
    init_logging();
    let (state, job_id) = submit(AppState::new());
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Err(ScrapeFailure::Service {
                status: 404,
                detail: Some("Board not found".to_string()),
            }),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.job(), &JobState::Failed("Board not found".to_string()));
    assert_eq!(state.message().as_deref(), Some("Board not found"));
    assert_eq!(state.active_tab(), Tab::Scrape);
}

#[test]
fn service_failure_without_detail_uses_fallback() {
    init_logging();
    let (state, job_id) = submit(AppState::new());
    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Err(ScrapeFailure::Service {
                status: 500,
                detail: None,
            }),
        },
    );

    assert_eq!(
        state.job(),
        &JobState::Failed(SERVICE_FALLBACK_MESSAGE.to_string())
    );
}

#[test]
fn transport_failure_uses_unreachable_message() {
    init_logging();
    let (state, job_id) = submit(AppState::new());
    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Err(ScrapeFailure::Transport {
                reason: "connection refused".to_string(),
            }),
        },
    );

    assert_eq!(
        state.job(),
        &JobState::Failed(TRANSPORT_FAILURE_MESSAGE.to_string())
    );
}

#[test]
fn submit_is_ignored_while_submitting() {
    init_logging();
    let (mut state, _job_id) = submit(AppState::new());
    assert!(state.consume_dirty());

    let (mut state, effects) =
        update(state, Msg::SubmitClicked(form("https://pinterest.com/u/other/")));

    assert!(effects.is_empty());
    assert_eq!(state.job(), &JobState::Submitting { job_id: 1 });
    assert!(!state.consume_dirty());
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, job_id) = submit(AppState::new());
    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            job_id: job_id + 7,
            result: Ok(vec![pin("stale")]),
        },
    );
    assert_eq!(state.job(), &JobState::Submitting { job_id });

    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Ok(Vec::new()),
        },
    );
    // A second completion for a finished job changes nothing.
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Ok(vec![pin("late")]),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.job(), &JobState::Succeeded(Vec::new()));
}

#[test]
fn resubmission_clears_results_and_errors() {
    init_logging();
    let (state, job_id) = submit(AppState::new());
    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Err(ScrapeFailure::Transport {
                reason: "down".to_string(),
            }),
        },
    );
    assert!(state.message().is_some());

    let (state, second) = submit(state);
    assert_eq!(second, job_id + 1);
    assert_eq!(state.job(), &JobState::Submitting { job_id: second });
    assert!(state.job().results().is_empty());
    assert_eq!(state.message(), None);
}

#[test]
fn validation_message_is_cleared_by_next_accepted_submission() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::VisibilityChanged(Visibility::Private));
    let (state, _) = update(state, Msg::SubmitClicked(form("https://pinterest.com/u/b/")));
    assert!(state.message().is_some());

    let (state, _) = update(state, Msg::VisibilityChanged(Visibility::Public));
    let (state, _job_id) = submit(state);
    assert_eq!(state.message(), None);
}

#[test]
fn noop_leaves_a_running_job_untouched() {
    init_logging();
    let (mut state, job_id) = submit(AppState::new());
    state.consume_dirty();

    let (mut next, effects) = update(state.clone(), Msg::NoOp);

    assert!(effects.is_empty());
    assert_eq!(next, state);
    assert_eq!(next.job(), &JobState::Submitting { job_id });
    assert!(!next.consume_dirty());
}
