use crate::controller::{self, load_view};
use crate::errors::AppError;
use crate::habits::HabitRegistry;
use crate::logs::LogStore;
use crate::models::{
    AddHabitRequest, CompletionRequest, HabitListResponse, HabitRequest, HabitView, LogListResponse,
    SessionRequest, SummaryResponse, UserQuery,
};
use crate::session::Session;
use crate::state::AppState;
use crate::stats::monthly_summary_at;
use crate::ui::{render_index, render_login, Notice};
use axum::{
    extract::{Query, State},
    response::Html,
    Form, Json,
};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Html<String>, AppError> {
    let UserQuery { user, habit } = query;
    let Some(user) = user.filter(|user| !user.trim().is_empty()) else {
        return Ok(Html(render_login(None)));
    };

    let session = Session::new(&user)?;
    let view = state
        .with_conn(move |conn| load_view(conn, &session, habit.as_deref()))
        .await?;
    Ok(Html(render_index(&view, None)))
}

pub async fn start_session(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Html<String>, AppError> {
    let Ok(session) = Session::new(query.user.as_deref().unwrap_or_default()) else {
        return Ok(Html(render_login(Some("Please enter a username"))));
    };

    let view = state
        .with_conn(move |conn| controller::start_session(conn, &session))
        .await?;
    Ok(Html(render_index(&view, None)))
}

pub async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<CompletionRequest>,
) -> Result<Html<String>, AppError> {
    let session = Session::new(&form.user)?;
    let (view, notice) = state
        .with_conn(move |conn| {
            let date = form.date.unwrap_or(session.today);
            let notice = client_notice(controller::set_completion(conn, &session, &form.habit, date, form.done))?;
            Ok((load_view(conn, &session, form.selected.as_deref())?, notice))
        })
        .await?;
    Ok(Html(render_index(&view, notice.as_ref())))
}

pub async fn add_habit(
    State(state): State<AppState>,
    Form(form): Form<AddHabitRequest>,
) -> Result<Html<String>, AppError> {
    let session = Session::new(&form.user)?;
    let (view, notice) = state
        .with_conn(move |conn| {
            let notice = match controller::add_habit(conn, &session, &form.name) {
                Ok(name) => Some(Notice::success(format!("Added habit: {name}"))),
                Err(err) => client_notice(Err(err))?,
            };
            Ok((load_view(conn, &session, form.selected.as_deref())?, notice))
        })
        .await?;
    Ok(Html(render_index(&view, notice.as_ref())))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Form(form): Form<HabitRequest>,
) -> Result<Html<String>, AppError> {
    let session = Session::new(&form.user)?;
    let (view, notice) = state
        .with_conn(move |conn| {
            let notice = client_notice(controller::remove_habit(conn, &session, &form.habit))?;
            Ok((load_view(conn, &session, form.selected.as_deref())?, notice))
        })
        .await?;
    Ok(Html(render_index(&view, notice.as_ref())))
}

pub async fn api_start_session(
    State(state): State<AppState>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<HabitView>, AppError> {
    let session = Session::new(&payload.user)?;
    let view = state
        .with_conn(move |conn| controller::start_session(conn, &session))
        .await?;
    Ok(Json(view))
}

pub async fn get_view(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<HabitView>, AppError> {
    let session = Session::new(query.user.as_deref().unwrap_or_default())?;
    let view = state
        .with_conn(move |conn| load_view(conn, &session, query.habit.as_deref()))
        .await?;
    Ok(Json(view))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<HabitListResponse>, AppError> {
    let session = Session::new(query.user.as_deref().unwrap_or_default())?;
    let habits = state
        .with_conn(move |conn| Ok(HabitRegistry::new(conn).list_habits(&session.username)?))
        .await?;
    Ok(Json(HabitListResponse { habits }))
}

pub async fn api_add_habit(
    State(state): State<AppState>,
    Json(payload): Json<AddHabitRequest>,
) -> Result<Json<HabitView>, AppError> {
    let session = Session::new(&payload.user)?;
    let view = state
        .with_conn(move |conn| {
            let name = controller::add_habit(conn, &session, &payload.name)?;
            load_view(conn, &session, Some(payload.selected.as_deref().unwrap_or(&name)))
        })
        .await?;
    Ok(Json(view))
}

pub async fn api_remove_habit(
    State(state): State<AppState>,
    Json(payload): Json<HabitRequest>,
) -> Result<Json<HabitView>, AppError> {
    let session = Session::new(&payload.user)?;
    let view = state
        .with_conn(move |conn| {
            controller::remove_habit(conn, &session, &payload.habit)?;
            load_view(conn, &session, payload.selected.as_deref())
        })
        .await?;
    Ok(Json(view))
}

pub async fn api_set_completion(
    State(state): State<AppState>,
    Json(payload): Json<CompletionRequest>,
) -> Result<Json<HabitView>, AppError> {
    let session = Session::new(&payload.user)?;
    let view = state
        .with_conn(move |conn| {
            let date = payload.date.unwrap_or(session.today);
            controller::set_completion(conn, &session, &payload.habit, date, payload.done)?;
            load_view(conn, &session, Some(payload.selected.as_deref().unwrap_or(&payload.habit)))
        })
        .await?;
    Ok(Json(view))
}

pub async fn get_logs(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<LogListResponse>, AppError> {
    let session = Session::new(query.user.as_deref().unwrap_or_default())?;
    let logs = state
        .with_conn(move |conn| Ok(LogStore::new(conn).get_all_logs(&session.username)?))
        .await?;
    Ok(Json(LogListResponse { logs }))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let session = Session::new(query.user.as_deref().unwrap_or_default())?;
    let habit = query
        .habit
        .map(|habit| habit.trim().to_string())
        .filter(|habit| !habit.is_empty())
        .ok_or_else(|| AppError::bad_request("habit is required"))?;

    let response = state
        .with_conn(move |conn| {
            let logs = LogStore::new(conn).get_all_logs(&session.username)?;
            let months = monthly_summary_at(session.today, &logs, &habit);
            Ok(SummaryResponse { habit, months })
        })
        .await?;
    Ok(Json(response))
}

/// Client mistakes become a notice on the page; anything else stays an error.
fn client_notice(result: Result<(), AppError>) -> Result<Option<Notice>, AppError> {
    match result {
        Ok(()) => Ok(None),
        Err(err) if err.status.is_client_error() => Ok(Some(Notice::from_error(&err))),
        Err(err) => Err(err),
    }
}
