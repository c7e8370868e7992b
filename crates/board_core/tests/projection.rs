use board_core::{
    project, update, AppState, EmptyReason, Effect, FormInput, JobState, JobStatus, LinkRow, Msg,
    Projection, ResultRecord, ScrapeFailure, ViewMode, NOT_AVAILABLE, PLACEHOLDER_IMAGE,
};
use pretty_assertions::assert_eq;
use url::Url;

fn records() -> Vec<ResultRecord> {
    vec![
        ResultRecord {
            id: Some("17".to_string()),
            title: Some("First".to_string()),
            url: Some("https://pin/1".to_string()),
            image: Some("https://img/1.jpg".to_string()),
            description: Some("one".to_string()),
            width: Some(600),
            height: Some(800),
            ..ResultRecord::default()
        },
        ResultRecord::default(),
    ]
}

fn succeeded_state() -> AppState {
    let board = Url::parse("https://pinterest.com/u/b/").unwrap();
    let (state, effects) = update(AppState::new(), Msg::SubmitClicked(FormInput::new(board)));
    let job_id = match &effects[0] {
        Effect::SubmitScrape { job_id, .. } => *job_id,
        other => panic!("unexpected effect {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            job_id,
            result: Ok(records()),
        },
    );
    state
}

#[test]
fn idle_and_submitting_render_distinct_empty_states() {
    assert_eq!(
        project(&JobState::Idle, ViewMode::Grid),
        Projection::Empty {
            reason: EmptyReason::NotSubmitted
        }
    );
    assert_eq!(
        project(&JobState::Submitting { job_id: 1 }, ViewMode::Table),
        Projection::Empty {
            reason: EmptyReason::InProgress
        }
    );
    assert_eq!(
        project(&JobState::Succeeded(Vec::new()), ViewMode::Links),
        Projection::Empty {
            reason: EmptyReason::NoPins
        }
    );
    assert_ne!(
        EmptyReason::NotSubmitted.message(),
        EmptyReason::NoPins.message()
    );
}

#[test]
fn failure_renders_error_only() {
    let job = JobState::Failed("Board not found".to_string());
    for mode in [ViewMode::Grid, ViewMode::List, ViewMode::Links, ViewMode::Table] {
        assert_eq!(
            project(&job, mode),
            Projection::Error {
                message: "Board not found".to_string()
            }
        );
    }
}

#[test]
fn grid_cards_keep_order_and_apply_fallbacks() {
    let projection = project(&JobState::Succeeded(records()), ViewMode::Grid);
    let Projection::Grid { count, cards } = projection else {
        panic!("expected grid projection");
    };

    assert_eq!(count, 2);
    assert_eq!(cards[0].key, "17");
    assert_eq!(cards[0].title, "First");
    assert_eq!(cards[0].image, "https://img/1.jpg");
    assert_eq!(cards[0].dimensions.as_deref(), Some("600x800"));

    assert_eq!(cards[1].key, "1");
    assert_eq!(cards[1].title, NOT_AVAILABLE);
    assert_eq!(cards[1].image, PLACEHOLDER_IMAGE);
    assert_eq!(cards[1].description, NOT_AVAILABLE);
    assert_eq!(cards[1].link, None);
    assert_eq!(cards[1].dimensions, None);
}

#[test]
fn list_uses_the_same_cards_as_grid() {
    let job = JobState::Succeeded(records());
    let (Projection::Grid { cards: grid, .. }, Projection::List { cards: list, .. }) =
        (project(&job, ViewMode::Grid), project(&job, ViewMode::List))
    else {
        panic!("expected grid and list projections");
    };
    assert_eq!(grid, list);
}

#[test]
fn links_use_title_as_label_and_url_as_target() {
    let projection = project(&JobState::Succeeded(records()), ViewMode::Links);
    assert_eq!(
        projection,
        Projection::Links {
            count: 2,
            links: vec![
                LinkRow {
                    key: "17".to_string(),
                    label: "First".to_string(),
                    target: Some("https://pin/1".to_string()),
                },
                LinkRow {
                    key: "1".to_string(),
                    label: NOT_AVAILABLE.to_string(),
                    target: None,
                },
            ],
        }
    );
}

#[test]
fn table_delegates_to_tsv_export() {
    let results = records();
    let projection = project(&JobState::Succeeded(results.clone()), ViewMode::Table);
    assert_eq!(
        projection,
        Projection::Table {
            count: 2,
            text: board_core::to_tsv(&results),
        }
    );
}

#[test]
fn switching_view_mode_never_changes_results() {
    let mut state = succeeded_state();
    let before = state.job().clone();
    assert!(state.consume_dirty());

    for mode in [ViewMode::List, ViewMode::Links, ViewMode::Table, ViewMode::Grid] {
        let (next, effects) = update(state, Msg::ViewModeSelected(mode));
        assert!(effects.is_empty());
        assert_eq!(next.job(), &before);
        assert_eq!(next.view_mode(), mode);
        state = next;
    }
}

#[test]
fn selecting_the_current_view_mode_is_not_dirty() {
    let mut state = succeeded_state();
    state.consume_dirty();
    let (mut state, _) = update(state, Msg::ViewModeSelected(ViewMode::Grid));
    assert!(!state.consume_dirty());
}

#[test]
fn view_model_reports_status_and_counts() {
    let state = succeeded_state();
    let view = state.view(std::time::Instant::now());

    assert_eq!(view.status, JobStatus::Succeeded);
    assert_eq!(view.result_count, 2);
    assert!(view.can_submit);
    assert!(!view.copied);
    assert_eq!(view.message, None);
    assert_eq!(view.projection, state.projection());
}

#[test]
fn failed_view_model_carries_message() {
    let board = Url::parse("https://pinterest.com/u/b/").unwrap();
    let (state, _) = update(AppState::new(), Msg::SubmitClicked(FormInput::new(board)));
    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            job_id: 1,
            result: Err(ScrapeFailure::Service {
                status: 400,
                detail: Some("Board not found".to_string()),
            }),
        },
    );

    let view = state.view(std::time::Instant::now());
    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.message.as_deref(), Some("Board not found"));
    assert_eq!(
        view.projection,
        Projection::Error {
            message: "Board not found".to_string()
        }
    );
}
