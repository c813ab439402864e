//! API route handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tokio_util::io::ReaderStream;
use tracing::info;

use ytgate_shared::errors::GateError;
use ytgate_shared::gateway::AccessRequest;
use ytgate_shared::models::{
    DirectUrlQuery, DirectUrlResponse, DownloadRequest, DownloadResponse, DownloadStatus,
    FileQuery, InfoQuery, SignRequest, SignResponse,
};

use crate::auth::{self, bad_input, reject, ApiRejection};
use crate::AppState;

// ====== TOOL ROUTES ======

/// GET /info - yt-dlp metadata for a URL
pub async fn info(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<InfoQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiRejection> {
    auth::require_bearer(&headers, &state)?;
    let Query(query) = query.map_err(bad_input)?;

    let info = state.ytdlp.info(&query.url).await.map_err(reject)?;
    Ok(Json(info))
}

/// GET /direct-url - direct stream URL for a format
pub async fn direct_url(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<DirectUrlQuery>, QueryRejection>,
) -> Result<Json<DirectUrlResponse>, ApiRejection> {
    auth::require_bearer(&headers, &state)?;
    let Query(query) = query.map_err(bad_input)?;

    let direct_url = state
        .ytdlp
        .direct_url(&query.url, &query.format)
        .await
        .map_err(reject)?;
    Ok(Json(DirectUrlResponse { direct_url }))
}

/// POST /download - download a video into storage
pub async fn download(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadResponse>, ApiRejection> {
    auth::require_bearer(&headers, &state)?;
    let Json(body) = body.map_err(bad_input)?;

    let filename = body
        .filename
        .unwrap_or_else(|| format!("video_{}.mp4", uuid::Uuid::new_v4().simple()));
    let path = state.storage.resolve(&filename).map_err(reject)?;

    state
        .ytdlp
        .download(&body.url, &body.format, &path)
        .await
        .map_err(reject)?;

    if !path.is_file() {
        return Err(reject(GateError::MissingOutput(path.display().to_string())));
    }

    info!("Downloaded {} -> {}", body.url, path.display());
    Ok(Json(DownloadResponse {
        status: DownloadStatus::Success,
        filename,
        path: path.display().to_string(),
    }))
}

// ====== FILE ROUTES ======

/// GET /download-file - serve a stored file via signed link or bearer token
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<FileQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiRejection> {
    let Query(query) = query.map_err(bad_input)?;
    let access = AccessRequest::classify(
        query.exp,
        query.sig,
        auth::authorization_header(&headers).map(str::to_string),
    );
    state
        .gateway
        .authorize(&query.filename, &access)
        .map_err(reject)?;

    let path = state.storage.locate(&query.filename).map_err(reject)?;
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| reject(e.into()))?;
    let length = file
        .metadata()
        .await
        .map_err(|e| reject(e.into()))?
        .len();

    info!("Serving {} ({} bytes, {})", query.filename, length, access.mode());

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type_for(&query.filename).to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&query.filename)),
        ],
        body,
    ))
}

/// POST /download-signed - mint a signed link for a stored file
pub async fn download_signed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<SignRequest>, JsonRejection>,
) -> Result<Json<SignResponse>, ApiRejection> {
    auth::require_bearer(&headers, &state)?;
    let Json(body) = body.map_err(bad_input)?;

    state.storage.locate(&body.filename).map_err(reject)?;
    let capability = state
        .signer
        .mint(&body.filename, body.expires_in)
        .map_err(reject)?;

    info!("Signed link for {} valid until {}", body.filename, capability.expiry);
    Ok(Json(SignResponse {
        url: capability.url(),
    }))
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mp3" => "audio/mpeg",
        "m4a" | "aac" => "audio/mp4",
        "opus" | "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}

fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        format!("attachment; filename=\"{}\"", filename.replace('"', "_"))
    } else {
        format!("attachment; filename*=utf-8''{}", urlencoding::encode(filename))
    }
}
