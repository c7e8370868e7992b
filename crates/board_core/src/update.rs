use crate::export::{links_text, to_tsv};
use crate::{AppState, CopyTarget, Effect, JobState, Msg, ScrapeRequest};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::VisibilityChanged(visibility) => {
            state.set_visibility(visibility);
            Vec::new()
        }
        Msg::SubmitClicked(form) => {
            // At most one submission in flight; the control is disabled meanwhile.
            if !state.can_submit() {
                return (state, Vec::new());
            }
            match ScrapeRequest::from_form(form, state.visibility()) {
                Ok(request) => {
                    let job_id = state.begin_submission();
                    vec![Effect::SubmitScrape { job_id, request }]
                }
                Err(err) => {
                    state.reject_submission(err);
                    Vec::new()
                }
            }
        }
        Msg::ScrapeFinished { job_id, result } => {
            if state.in_flight_job() != Some(job_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(results) => {
                    let pin_count = results.len();
                    state.complete_job(results);
                    vec![Effect::JobCompleted { job_id, pin_count }]
                }
                Err(failure) => {
                    state.fail_job(failure.user_message());
                    Vec::new()
                }
            }
        }
        Msg::TabSelected(tab) => {
            state.select_tab(tab);
            Vec::new()
        }
        Msg::ViewModeSelected(mode) => {
            state.select_view_mode(mode);
            Vec::new()
        }
        Msg::CopyRequested(target) => match copy_text(state.job(), target) {
            Some(text) => vec![Effect::CopyText { text }],
            None => Vec::new(),
        },
        Msg::CopySucceeded { at } => {
            state.acknowledge_copy(at);
            Vec::new()
        }
        Msg::Tick { now } => {
            state.expire_copy_ack(now);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn copy_text(job: &JobState, target: CopyTarget) -> Option<String> {
    let results = job.results();
    if results.is_empty() {
        return None;
    }
    match target {
        CopyTarget::Tsv => Some(to_tsv(results)),
        CopyTarget::AllLinks => Some(links_text(results)),
        CopyTarget::Image(index) => results
            .get(index)
            .map(|record| record.image_for_copy().to_string()),
    }
}
