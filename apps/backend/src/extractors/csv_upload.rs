use std::future::Future;
use std::pin::Pin;

use actix_multipart::Multipart;
use actix_web::dev::Payload;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{FromRequest, HttpRequest};
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Largest CSV document accepted, multipart framing excluded.
pub const MAX_CSV_BODY: usize = 4 * 1024 * 1024;

/// Form field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// CSV document from an upload request.
///
/// `multipart/form-data` bodies contribute the `file` part; any other body
/// is taken as the CSV itself. A form without a `file` part yields an empty
/// document, which the catalog rejects as "no file".
#[derive(Debug)]
pub struct CsvUpload(pub Bytes);

impl CsvUpload {
    pub fn into_inner(self) -> Bytes {
        self.0
    }
}

impl FromRequest for CsvUpload {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let payload = payload.take();

        if is_multipart(req) {
            let multipart = Multipart::new(req.headers(), payload);
            Box::pin(async move { read_file_part(multipart).await.map(CsvUpload) })
        } else {
            Box::pin(async move { collect_limited(payload).await.map(CsvUpload) })
        }
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

async fn read_file_part(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next().await {
        let field = field.map_err(|e| {
            debug!(error = %e, "malformed multipart body");
            AppError::bad_request(ErrorCode::BadRequest, "Malformed multipart body")
        })?;
        let is_file = field.name() == Some(FILE_FIELD);
        let bytes = collect_limited(field).await?;
        if is_file {
            return Ok(bytes);
        }
    }
    debug!("multipart upload without a file part");
    Ok(Bytes::new())
}

async fn collect_limited<S, E>(mut stream: S) -> Result<Bytes, AppError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut body = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(error = %e, "failed to read upload body");
            AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
        })?;
        if body.len() + chunk.len() > MAX_CSV_BODY {
            return Err(AppError::bad_request(
                ErrorCode::BadRequest,
                format!("Upload exceeds {MAX_CSV_BODY} bytes"),
            ));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

