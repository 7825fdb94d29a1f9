use crate::errors::AppError;
use crate::models::{ActionResponse, SettingsForm, SettingsRequest, ToggleRequest, TrackerView};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let tracker = state.tracker.lock().await;
    Html(render_index(&tracker.view()))
}

pub async fn get_state(State(state): State<AppState>) -> Json<TrackerView> {
    let tracker = state.tracker.lock().await;
    Json(tracker.view())
}

pub async fn toggle(
    State(state): State<AppState>,
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, AppError> {
    let Json(payload) = payload?;
    let mut tracker = state.tracker.lock().await;
    let box_count = tracker.progress().box_count();

    let outcome = tracker
        .toggle_box(payload.position, payload.checked)
        .ok_or_else(|| {
            AppError::bad_request(format!(
                "position {} is outside the grid of {box_count} boxes",
                payload.position
            ))
        })?;

    state.storage.save_checked(&outcome.checked_values).await;
    debug!(
        position = payload.position,
        checked = payload.checked,
        total = tracker.progress().total(),
        "box toggled"
    );

    Ok(Json(ActionResponse {
        state: tracker.view(),
        effects: outcome.effects,
    }))
}

pub async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<SettingsRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, AppError> {
    let Json(payload) = payload?;
    let response = apply_settings(
        &state,
        &payload.goal_text(),
        &payload.step_text(),
        &payload.interval_text(),
        payload.confetti_enabled(),
    )
    .await;
    Ok(Json(response))
}

pub async fn submit_settings(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Redirect {
    apply_settings(
        &state,
        &form.goal,
        &form.step,
        &form.confetti_interval,
        form.confetti_enabled.is_some(),
    )
    .await;
    Redirect::to("/")
}

async fn apply_settings(
    state: &AppState,
    goal: &str,
    step: &str,
    interval: &str,
    confetti_enabled: bool,
) -> ActionResponse {
    let mut tracker = state.tracker.lock().await;
    let outcome = tracker.apply_settings(goal, step, interval, confetti_enabled);
    state.storage.save_settings(&outcome.settings).await;

    info!(
        goal = outcome.settings.goal,
        step = outcome.settings.step,
        confetti = outcome.settings.confetti_enabled,
        interval = outcome.settings.confetti_interval,
        "settings applied"
    );

    ActionResponse {
        state: tracker.view(),
        effects: outcome.effects,
    }
}
