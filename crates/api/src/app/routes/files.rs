use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use formwarden_core::{Source, SourcedError, ValidationError};

use crate::app::{dto, errors};

const ROUTE: &str = "files.post_image";
const IMAGE_FIELD: &str = "image";

/// Reports name, media type and size of the uploaded `image` part.
pub async fn post_image(multipart: Result<Multipart, MultipartRejection>) -> Response {
    let missing = || {
        errors::validation_failed(
            ROUTE,
            vec![SourcedError {
                source: Source::Form,
                error: ValidationError::missing(IMAGE_FIELD),
            }],
        )
    };

    let mut multipart = match multipart {
        Ok(m) => m,
        Err(_) => return missing(),
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return missing(),
            Err(e) => {
                tracing::debug!(error = %e, "malformed multipart body");
                return errors::json_error(e.status(), "bad_request", e.body_text());
            }
        };
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let format = field.content_type().map(str::to_string);
        return match field.bytes().await {
            Ok(bytes) => {
                let image = dto::UploadedImage::new(filename, format, bytes.len());
                tracing::info!(size_kb = image.size_kb, "image received");
                (StatusCode::OK, Json(image)).into_response()
            }
            Err(e) => errors::json_error(e.status(), "bad_request", e.body_text()),
        };
    }
}
