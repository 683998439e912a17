use crate::errors::AppError;
use crate::models::{AttendanceLedger, DateQuery, DayView, MarkForm, MarkRequest, MarkResponse, StatsResponse};
use crate::scoring::{describe, MarkOutcome};
use crate::state::AppState;
use crate::ui::{render_index, render_stats};
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Html<String>, AppError> {
    let date = resolve_date(query.date.as_deref())?;
    let tracker = state.tracker.lock().await;
    let view = tracker.day_view(date, today())?;
    Ok(Html(render_index(&view)))
}

pub async fn stats_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let tracker = state.tracker.lock().await;
    let stats = tracker.stats(today())?;
    Ok(Html(render_stats(&stats)))
}

pub async fn get_day(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayView>, AppError> {
    let date = resolve_date(query.date.as_deref())?;
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.day_view(date, today())?))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.stats(today())?))
}

pub async fn get_ledger(State(state): State<AppState>) -> Result<Json<AttendanceLedger>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.ledger()?))
}

pub async fn mark(
    State(state): State<AppState>,
    Json(payload): Json<MarkRequest>,
) -> Result<Json<MarkResponse>, AppError> {
    let date = payload.date.unwrap_or_else(today);
    let outcome = apply_mark(&state, &payload.subject, date, payload.present).await?;
    Ok(Json(to_response(date, payload.present, outcome)))
}

pub async fn mark_form(
    State(state): State<AppState>,
    Form(form): Form<MarkForm>,
) -> Result<Redirect, AppError> {
    let date = resolve_date(Some(&form.date))?;
    let present = match form.status.trim() {
        "present" => true,
        "absent" => false,
        _ => return Err(AppError::bad_request("status must be 'present' or 'absent'")),
    };

    apply_mark(&state, &form.subject, date, present).await?;
    Ok(Redirect::to(&format!("/?date={date}")))
}

async fn apply_mark(
    state: &AppState,
    subject: &str,
    date: NaiveDate,
    present: bool,
) -> Result<MarkOutcome, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(tracker.mark(subject, date, present)?)
}

fn to_response(date: NaiveDate, present: bool, outcome: MarkOutcome) -> MarkResponse {
    MarkResponse {
        message: describe(&outcome.subject, outcome.kind, present),
        subject: outcome.subject,
        date,
        present,
        kind: outcome.kind,
        record: outcome.record,
    }
}

fn resolve_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(today()),
        Some(value) => value
            .parse::<NaiveDate>()
            .map_err(|_| AppError::bad_request(format!("invalid date '{value}', expected YYYY-MM-DD"))),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
