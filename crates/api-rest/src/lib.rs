//! # API REST
//!
//! REST API implementation for the studio album service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - Static serving of the media root under the media URL prefix
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Filesystem work is delegated to `studio-core`, on tokio's blocking pool.

#![warn(rust_2018_idioms)]

pub mod settings;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AlbumImage, ConfirmCartReq, ConfirmCartRes, CreateClientFolderReq, CreateClientFolderRes,
    ErrorRes, HealthRes, HealthService, SkipReason, SkippedFile,
};
use studio_core::{AlbumError, AlbumService, StudioConfig};

pub use settings::ServerSettings;

pub const LIST_ALBUMS_PATH: &str = "/api/albums/liste/";
pub const CREATE_CLIENT_PATH: &str = "/api/albums/create-client/";
pub const CONFIRM_CART_PATH: &str = "/api/albums/confirm-cart/";

type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    album_service: AlbumService,
}

impl AppState {
    pub fn new(cfg: Arc<StudioConfig>) -> Self {
        Self {
            album_service: AlbumService::new(cfg),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_albums, create_client_folder, confirm_cart),
    components(schemas(
        HealthRes,
        AlbumImage,
        CreateClientFolderReq,
        CreateClientFolderRes,
        ConfirmCartReq,
        ConfirmCartRes,
        SkippedFile,
        SkipReason,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the router described by `settings`.
pub fn app(settings: &ServerSettings) -> Router {
    router(AppState::new(settings.cfg.clone()), settings.serve_media)
}

/// Builds the full router.
///
/// When `serve_media` is set, files under the media root are served read-only at the media URL
/// prefix, so every `path` returned by the API can be fetched directly.
pub fn router(state: AppState, serve_media: bool) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route(LIST_ALBUMS_PATH, get(list_albums))
        .route(CREATE_CLIENT_PATH, post(create_client_folder))
        .route(CONFIRM_CART_PATH, post(confirm_cart))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if serve_media {
        let cfg = state.album_service.config();
        let media = ServeDir::new(cfg.media_root());
        // axum cannot nest at the root; an empty prefix means media is the fallback.
        app = if cfg.media_url().is_empty() {
            app.fallback_service(media)
        } else {
            app.nest_service(cfg.media_url(), media)
        };
    }

    app.layer(CorsLayer::permissive()).with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/albums/liste/",
    responses(
        (status = 200, description = "Every image under the media root", body = [AlbumImage]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every image under the media root
///
/// Walks the media root recursively and returns one `{folder, path}` entry per image file.
/// A missing media root is an empty list, not an error.
#[axum::debug_handler]
async fn list_albums(State(state): State<AppState>) -> Result<Json<Vec<AlbumImage>>, ApiError> {
    let service = state.album_service.clone();
    let images = run_blocking(move || Ok(service.list_albums())).await?;
    Ok(Json(images))
}

#[utoipa::path(
    post,
    path = "/api/albums/create-client/",
    request_body = CreateClientFolderReq,
    responses(
        (status = 201, description = "Images moved into the client subfolder", body = CreateClientFolderRes),
        (status = 400, description = "Client name or files missing", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Move images into a client subfolder
///
/// Each image is moved into `<its folder>/<client>/`, keeping its file name. Paths that do not
/// name an existing image are skipped and listed in `skipped`.
#[axum::debug_handler]
async fn create_client_folder(
    State(state): State<AppState>,
    payload: Result<Json<CreateClientFolderReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateClientFolderRes>), ApiError> {
    let req = body_or_default(payload);
    let service = state.album_service.clone();
    let res = run_blocking(move || service.create_client_folder(req)).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    post,
    path = "/api/albums/confirm-cart/",
    request_body = ConfirmCartReq,
    responses(
        (status = 200, description = "Cart images copied to the validated folder", body = ConfirmCartRes),
        (status = 400, description = "Email or files missing", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Confirm a customer's cart
///
/// Copies each image into `validated/<email>/` under the media root. The originals stay where
/// they are. `copied` holds the externally visible paths of the copies.
#[axum::debug_handler]
async fn confirm_cart(
    State(state): State<AppState>,
    payload: Result<Json<ConfirmCartReq>, JsonRejection>,
) -> Result<Json<ConfirmCartRes>, ApiError> {
    let req = body_or_default(payload);
    let service = state.album_service.clone();
    let res = run_blocking(move || service.confirm_cart(req)).await?;
    Ok(Json(res))
}

/// An unreadable body is treated like an empty one, so the caller gets the same
/// "missing fields" error as for `{}`.
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!("unreadable request body: {}", rejection);
            T::default()
        }
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, AlbumError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(album_error_response),
        Err(e) => {
            tracing::error!("album task failed: {:?}", e);
            Err(internal_error())
        }
    }
}

fn album_error_response(err: AlbumError) -> ApiError {
    if err.is_validation() {
        return (StatusCode::BAD_REQUEST, Json(ErrorRes::new(err.to_string())));
    }

    tracing::error!("album operation error: {:?}", err);
    internal_error()
}

fn internal_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes::new("Internal error")),
    )
}
