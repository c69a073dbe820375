use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;
use validator::Validate;

use scribe_application::{JobMode, JobResponse, JobResult, TranscriptionJobRequest};

use crate::error::{error_mapper, HttpError};
use crate::AppState;

pub async fn submit_job(
    State(state): State<AppState>,
    Json(request): Json<TranscriptionJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), HttpError> {
    let request_id = Uuid::new_v4();
    tracing::info!(
        request_id = %request_id,
        key = %request.key,
        is_translate = request.is_translate.as_deref().unwrap_or("false"),
        translate_to = request.translate_to.as_deref().unwrap_or("English"),
        "received transcription job request"
    );

    request.validate().map_err(|err| HttpError::Validation {
        message: err.to_string(),
    })?;

    match request.mode() {
        JobMode::Translate => {
            let Some(translate) = state.translate.clone() else {
                return Err(HttpError::Validation {
                    message: "translation requests are not supported by this deployment"
                        .to_string(),
                });
            };
            match translate.translate(request.into_translate_request()).await {
                Ok(result) => {
                    tracing::info!(
                        request_id = %request_id,
                        language = %result.language,
                        "translation job completed"
                    );
                    Ok((
                        StatusCode::OK,
                        Json(JobResponse {
                            message: "translation completed successfully".to_string(),
                            result: JobResult::Translation(result),
                        }),
                    ))
                }
                Err(error) => {
                    tracing::error!(request_id = %request_id, error = %error, "translation job failed");
                    Err(error_mapper(error))
                }
            }
        }
        JobMode::Transcribe => {
            match state
                .transcribe
                .transcribe(request.into_transcribe_request())
                .await
            {
                Ok(result) => {
                    tracing::info!(
                        request_id = %request_id,
                        language = %result.language,
                        "transcription job completed"
                    );
                    Ok((
                        StatusCode::OK,
                        Json(JobResponse {
                            message: "transcription completed successfully".to_string(),
                            result: JobResult::Transcription(result),
                        }),
                    ))
                }
                Err(error) => {
                    tracing::error!(request_id = %request_id, error = %error, "transcription job failed");
                    Err(error_mapper(error))
                }
            }
        }
    }
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
