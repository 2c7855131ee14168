//! Media upload handler

use crate::error::{AppError, Result};
use crate::services::MediaService;
use crate::state::AppState;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::StreamExt;

/// Upload the raw request body to `bucket/path` and return its public URL
pub async fn upload_media(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    mut payload: web::Payload,
) -> Result<HttpResponse> {
    let (bucket, object_path) = path.into_inner();
    let max_bytes = state.site.media_max_bytes;

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| AppError::Validation(format!("upload interrupted: {}", e)))?;
        if body.len() + chunk.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "upload exceeds the {} byte limit",
                max_bytes
            )));
        }
        body.extend_from_slice(&chunk);
    }

    let service = MediaService::new(state.store().await?, max_bytes);
    let url = service
        .upload(&bucket, &object_path, body.to_vec(), &content_type)
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "url": url })))
}
