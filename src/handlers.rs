use crate::errors::AppError;
use crate::models::{
    AddRecordRequest, DeleteRecordRequest, DeleteResponse, PainRecord, RecordsResponse,
    StatsResponse,
};
use crate::report::generate_text_report;
use crate::state::AppState;
use crate::stats::build_stats;
use crate::ui::{render_page, PageContext};
use crate::view::{Tab, ViewRouter};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub tab: Option<String>,
    pub saved: Option<u8>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let mut router = ViewRouter::default();
    if let Some(tab) = query.tab.as_deref() {
        router.select_named(tab);
    }

    let store = state.store.lock().await;
    let context = PageContext {
        tab: router.active(),
        records: store.records(),
        saved: query.saved == Some(1),
    };
    Html(render_page(&context, state.formatter.as_ref()))
}

pub async fn list_records(State(state): State<AppState>) -> Json<RecordsResponse> {
    let store = state.store.lock().await;
    Json(RecordsResponse {
        version: store.version(),
        records: store.records().to_vec(),
    })
}

pub async fn add_record(
    State(state): State<AppState>,
    Json(payload): Json<AddRecordRequest>,
) -> Result<Json<PainRecord>, AppError> {
    let mut store = state.store.lock().await;
    let record = store.add_record(payload.score, payload.note).await?;
    Ok(Json(record))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(request): Query<DeleteRecordRequest>,
) -> Json<DeleteResponse> {
    let mut store = state.store.lock().await;
    let deleted = store.delete_record(&id, |_| request.confirmed).await;
    Json(DeleteResponse { deleted })
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.store.lock().await;
    Json(build_stats(store.records(), state.formatter.as_ref()))
}

pub async fn get_report(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    let report = generate_text_report(store.records(), state.formatter.as_ref());
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], report)
}

pub async fn submit_record(
    State(state): State<AppState>,
    Form(form): Form<AddRecordRequest>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    store.add_record(form.score, form.note).await?;
    Ok(Redirect::to(&tab_url(Tab::Tracker, true)))
}

pub async fn submit_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteRecordRequest>,
) -> Redirect {
    let mut store = state.store.lock().await;
    store.delete_record(&id, |_| form.confirmed).await;
    Redirect::to(&tab_url(Tab::History, false))
}

fn tab_url(tab: Tab, saved: bool) -> String {
    if saved {
        format!("/?tab={}&saved=1", tab.as_str())
    } else {
        format!("/?tab={}", tab.as_str())
    }
}
