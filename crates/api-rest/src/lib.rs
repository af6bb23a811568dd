//! # API REST
//!
//! REST surface for the ICU intake wizard.
//!
//! Handles:
//! - HTTP endpoints with axum (one GET/POST pair per wizard section)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! All business logic lives in `intake-core`; handlers translate between
//! HTTP and the wizard's save/prefill calls. Every section response is the
//! render triple: consult id (if any), raw fields, and field errors.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::{Json, Redirect},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::wire::{
    ConsultListItem, ConsultView, FieldErrors, HealthRes, SectionAForm, SectionAView,
    SectionBForm, SectionBView, SectionCForm, SectionCView, SectionDForm, SectionDView,
    SectionEForm, SectionEView, SectionFForm, SectionFView, SectionGForm, SectionGView,
    SectionView,
};
use api_shared::HealthService;
use intake_core::{ConsultId, ConsultWizard, IntakeError, SaveOutcome, Stage};

/// Application state shared across REST API handlers.
///
/// Holds the wizard instance (and through it the consult store) used by all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    wizard: Arc<ConsultWizard>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        enter_section_a,
        save_section_a,
        enter_section_b,
        save_section_b,
        enter_section_c,
        save_section_c,
        enter_section_d,
        save_section_d,
        enter_section_e,
        save_section_e,
        enter_section_f,
        save_section_f,
        enter_section_g,
        save_section_g,
        consult_summary,
        submit_consult,
        list_consults,
        review_consult,
    ),
    components(schemas(
        HealthRes,
        FieldErrors,
        SectionAForm,
        SectionBForm,
        SectionCForm,
        SectionDForm,
        SectionEForm,
        SectionFForm,
        SectionGForm,
        SectionAView,
        SectionBView,
        SectionCView,
        SectionDView,
        SectionEView,
        SectionFView,
        SectionGView,
        ConsultView,
        ConsultListItem,
    ))
)]
struct ApiDoc;

/// Builds the full application router around a wizard instance.
pub fn app(wizard: Arc<ConsultWizard>) -> Router {
    let state = AppState { wizard };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/sections/a", get(enter_section_a).post(save_section_a))
        .route("/sections/b/:id", get(enter_section_b).post(save_section_b))
        .route("/sections/c/:id", get(enter_section_c).post(save_section_c))
        .route("/sections/d/:id", get(enter_section_d).post(save_section_d))
        .route("/sections/e/:id", get(enter_section_e).post(save_section_e))
        .route("/sections/f/:id", get(enter_section_f).post(save_section_f))
        .route("/sections/g/:id", get(enter_section_g).post(save_section_g))
        .route("/consults", get(list_consults))
        .route(
            "/consults/:id/summary",
            get(consult_summary).post(submit_consult),
        )
        .route("/consults/:id/review", get(review_consult))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Builds the render payload for a GET entry into a section.
fn entry_view<F>(stage: Stage, consult_id: Option<ConsultId>, fields: F) -> SectionView<F> {
    SectionView {
        consult_id: consult_id.map(|id| id.as_u64()),
        section: stage.as_str().to_owned(),
        fields,
        next: stage.next().map(|next| next.as_str().to_owned()),
        errors: FieldErrors::default(),
    }
}

/// Maps a save outcome to its HTTP response: `success` on a clean save,
/// 422 with the echoed fields and their messages otherwise.
fn save_response<F>(
    stage: Stage,
    id_hint: Option<ConsultId>,
    outcome: SaveOutcome<F>,
    success: StatusCode,
) -> (StatusCode, Json<SectionView<F>>) {
    match outcome {
        SaveOutcome::Saved {
            consult_id,
            next,
            fields,
        } => (
            success,
            Json(SectionView {
                consult_id: Some(consult_id.as_u64()),
                section: stage.as_str().to_owned(),
                fields,
                next: Some(next.as_str().to_owned()),
                errors: FieldErrors::default(),
            }),
        ),
        SaveOutcome::Invalid { fields, errors } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SectionView {
                consult_id: id_hint.map(|id| id.as_u64()),
                section: stage.as_str().to_owned(),
                fields,
                next: stage.next().map(|next| next.as_str().to_owned()),
                errors,
            }),
        ),
    }
}

/// Maps core errors to HTTP: unknown ids become 404, persistence failures
/// are logged and become 500. Validation never reaches this path.
fn map_error(err: IntakeError) -> (StatusCode, &'static str) {
    match err {
        IntakeError::NotFound(_) => (StatusCode::NOT_FOUND, "Consult not found"),
        other => {
            tracing::error!("consult store error: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

/// The intake flow starts at Section A.
async fn root() -> Redirect {
    Redirect::temporary("/sections/a")
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring and load balancer checks.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/sections/a",
    responses(
        (status = 200, description = "Blank section A form", body = SectionAView)
    )
)]
/// Entry into Section A: a blank form with no consult id.
#[axum::debug_handler]
async fn enter_section_a(State(state): State<AppState>) -> Json<SectionView<SectionAForm>> {
    Json(entry_view(Stage::SectionA, None, state.wizard.blank_patient()))
}

#[utoipa::path(
    post,
    path = "/sections/a",
    request_body = SectionAForm,
    responses(
        (status = 201, description = "Consult created", body = SectionAView),
        (status = 422, description = "Validation failed", body = SectionAView),
        (status = 500, description = "Internal server error")
    )
)]
/// Saves Section A, creating the consult record.
///
/// The successful response carries the normalized fields, so an age derived
/// from the date of birth is visible even when a different age was typed.
#[axum::debug_handler]
async fn save_section_a(
    State(state): State<AppState>,
    Json(form): Json<SectionAForm>,
) -> Result<(StatusCode, Json<SectionView<SectionAForm>>), (StatusCode, &'static str)> {
    let outcome = state.wizard.save_patient(&form).map_err(map_error)?;
    Ok(save_response(
        Stage::SectionA,
        None,
        outcome,
        StatusCode::CREATED,
    ))
}

#[utoipa::path(
    get,
    path = "/sections/b/{id}",
    responses(
        (status = 200, description = "Prefilled section B form", body = SectionBView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn enter_section_b(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<SectionView<SectionBForm>>, (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let fields = state.wizard.prefill_reason(id).map_err(map_error)?;
    Ok(Json(entry_view(Stage::SectionB, Some(id), fields)))
}

#[utoipa::path(
    post,
    path = "/sections/b/{id}",
    request_body = SectionBForm,
    responses(
        (status = 200, description = "Section B saved", body = SectionBView),
        (status = 422, description = "Validation failed", body = SectionBView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn save_section_b(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
    Json(form): Json<SectionBForm>,
) -> Result<(StatusCode, Json<SectionView<SectionBForm>>), (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let outcome = state.wizard.save_reason(id, &form).map_err(map_error)?;
    Ok(save_response(Stage::SectionB, Some(id), outcome, StatusCode::OK))
}

#[utoipa::path(
    get,
    path = "/sections/c/{id}",
    responses(
        (status = 200, description = "Prefilled section C form", body = SectionCView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn enter_section_c(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<SectionView<SectionCForm>>, (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let fields = state.wizard.prefill_summary(id).map_err(map_error)?;
    Ok(Json(entry_view(Stage::SectionC, Some(id), fields)))
}

#[utoipa::path(
    post,
    path = "/sections/c/{id}",
    request_body = SectionCForm,
    responses(
        (status = 200, description = "Section C saved", body = SectionCView),
        (status = 422, description = "Validation failed", body = SectionCView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn save_section_c(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
    Json(form): Json<SectionCForm>,
) -> Result<(StatusCode, Json<SectionView<SectionCForm>>), (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let outcome = state.wizard.save_summary(id, &form).map_err(map_error)?;
    Ok(save_response(Stage::SectionC, Some(id), outcome, StatusCode::OK))
}

#[utoipa::path(
    get,
    path = "/sections/d/{id}",
    responses(
        (status = 200, description = "Prefilled section D form", body = SectionDView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn enter_section_d(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<SectionView<SectionDForm>>, (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let fields = state.wizard.prefill_status(id).map_err(map_error)?;
    Ok(Json(entry_view(Stage::SectionD, Some(id), fields)))
}

#[utoipa::path(
    post,
    path = "/sections/d/{id}",
    request_body = SectionDForm,
    responses(
        (status = 200, description = "Section D saved", body = SectionDView),
        (status = 422, description = "Validation failed", body = SectionDView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn save_section_d(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
    Json(form): Json<SectionDForm>,
) -> Result<(StatusCode, Json<SectionView<SectionDForm>>), (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let outcome = state.wizard.save_status(id, &form).map_err(map_error)?;
    Ok(save_response(Stage::SectionD, Some(id), outcome, StatusCode::OK))
}

#[utoipa::path(
    get,
    path = "/sections/e/{id}",
    responses(
        (status = 200, description = "Prefilled section E form", body = SectionEView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn enter_section_e(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<SectionView<SectionEForm>>, (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let fields = state.wizard.prefill_investigations(id).map_err(map_error)?;
    Ok(Json(entry_view(Stage::SectionE, Some(id), fields)))
}

#[utoipa::path(
    post,
    path = "/sections/e/{id}",
    request_body = SectionEForm,
    responses(
        (status = 200, description = "Section E saved", body = SectionEView),
        (status = 422, description = "Validation failed", body = SectionEView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn save_section_e(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
    Json(form): Json<SectionEForm>,
) -> Result<(StatusCode, Json<SectionView<SectionEForm>>), (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let outcome = state
        .wizard
        .save_investigations(id, &form)
        .map_err(map_error)?;
    Ok(save_response(Stage::SectionE, Some(id), outcome, StatusCode::OK))
}

#[utoipa::path(
    get,
    path = "/sections/f/{id}",
    responses(
        (status = 200, description = "Prefilled section F form", body = SectionFView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn enter_section_f(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<SectionView<SectionFForm>>, (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let fields = state.wizard.prefill_interventions(id).map_err(map_error)?;
    Ok(Json(entry_view(Stage::SectionF, Some(id), fields)))
}

#[utoipa::path(
    post,
    path = "/sections/f/{id}",
    request_body = SectionFForm,
    responses(
        (status = 200, description = "Section F saved", body = SectionFView),
        (status = 422, description = "Validation failed", body = SectionFView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn save_section_f(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
    Json(form): Json<SectionFForm>,
) -> Result<(StatusCode, Json<SectionView<SectionFForm>>), (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let outcome = state
        .wizard
        .save_interventions(id, &form)
        .map_err(map_error)?;
    Ok(save_response(Stage::SectionF, Some(id), outcome, StatusCode::OK))
}

#[utoipa::path(
    get,
    path = "/sections/g/{id}",
    responses(
        (status = 200, description = "Prefilled section G form", body = SectionGView),
        (status = 404, description = "Consult not found")
    )
)]
#[axum::debug_handler]
async fn enter_section_g(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<SectionView<SectionGForm>>, (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let fields = state.wizard.prefill_assessment(id).map_err(map_error)?;
    Ok(Json(entry_view(Stage::SectionG, Some(id), fields)))
}

#[utoipa::path(
    post,
    path = "/sections/g/{id}",
    request_body = SectionGForm,
    responses(
        (status = 200, description = "Section G saved", body = SectionGView),
        (status = 422, description = "Validation failed", body = SectionGView),
        (status = 404, description = "Consult not found")
    )
)]
/// Saves the assessment. The consult is then eligible for submission from
/// the summary view; this save does not submit it.
#[axum::debug_handler]
async fn save_section_g(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
    Json(form): Json<SectionGForm>,
) -> Result<(StatusCode, Json<SectionView<SectionGForm>>), (StatusCode, &'static str)> {
    let id = ConsultId::new(id);
    let outcome = state.wizard.save_assessment(id, &form).map_err(map_error)?;
    Ok(save_response(Stage::SectionG, Some(id), outcome, StatusCode::OK))
}

#[utoipa::path(
    get,
    path = "/consults/{id}/summary",
    responses(
        (status = 200, description = "Full consult projection", body = ConsultView),
        (status = 404, description = "Consult not found")
    )
)]
/// Read-only summary of the whole consult, available at any time given a
/// valid id.
#[axum::debug_handler]
async fn consult_summary(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<ConsultView>, (StatusCode, &'static str)> {
    let view = state
        .wizard
        .summary(ConsultId::new(id))
        .map_err(map_error)?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/consults/{id}/summary",
    responses(
        (status = 200, description = "Consult submitted", body = ConsultView),
        (status = 404, description = "Consult not found")
    )
)]
/// The submission gate. Idempotent: submitting an already-submitted consult
/// succeeds without change.
#[axum::debug_handler]
async fn submit_consult(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<ConsultView>, (StatusCode, &'static str)> {
    let view = state.wizard.submit(ConsultId::new(id)).map_err(map_error)?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/consults",
    responses(
        (status = 200, description = "Submitted consults, newest first", body = [ConsultListItem]),
        (status = 500, description = "Internal server error")
    )
)]
/// Public listing of submitted consults.
#[axum::debug_handler]
async fn list_consults(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConsultListItem>>, (StatusCode, &'static str)> {
    let items = state.wizard.list_submitted().map_err(map_error)?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/consults/{id}/review",
    responses(
        (status = 200, description = "Review projection of one consult", body = ConsultView),
        (status = 404, description = "Consult not found")
    )
)]
/// Review-only projection of a single consult.
#[axum::debug_handler]
async fn review_consult(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Json<ConsultView>, (StatusCode, &'static str)> {
    let view = state
        .wizard
        .summary(ConsultId::new(id))
        .map_err(map_error)?;
    Ok(Json(view))
}
