//! Document Chat - Model (API functions)

use crate::shared::api_utils::api_url;
use contracts::domain::a001_document_chat::{
    ChatRequest, ChatResponse, ErrorResponse, UploadResponse,
};
use gloo_net::http::{Request, Response};

pub const UPLOAD_FALLBACK: &str = "Upload failed";
pub const CHAT_FALLBACK: &str = "Failed to get response";

/// Ошибка запроса к backend.
///
/// Transport failures, rejected statuses and unreadable bodies all end up
/// here; the message is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Upload(String),
    #[error("{0}")]
    Chat(String),
}

/// Message for a non-2xx response: the server's `detail`, else `fallback`.
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message())
        .unwrap_or_else(|| fallback.to_string())
}

async fn rejection_message(response: Response, fallback: &str) -> String {
    let body = response.text().await.unwrap_or_default();
    error_message(&body, fallback)
}

/// Загрузить документ (multipart, поле `file`)
pub async fn upload_document(file: &web_sys::File) -> Result<UploadResponse, ApiError> {
    let form_data = web_sys::FormData::new().map_err(|e| ApiError::Upload(format!("{e:?}")))?;
    form_data
        .append_with_blob("file", file)
        .map_err(|e| ApiError::Upload(format!("{e:?}")))?;

    let response = Request::post(&api_url("/upload"))
        .body(form_data)
        .map_err(|e| ApiError::Upload(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let message = rejection_message(response, UPLOAD_FALLBACK).await;
        log::warn!("upload rejected with HTTP {}: {}", status, message);
        return Err(ApiError::Upload(message));
    }

    response
        .json::<UploadResponse>()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))
}

/// Отправить сообщение в тред
pub async fn send_chat(request: &ChatRequest) -> Result<ChatResponse, ApiError> {
    let response = Request::post(&api_url("/chat"))
        .json(request)
        .map_err(|e| ApiError::Chat(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Chat(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let message = rejection_message(response, CHAT_FALLBACK).await;
        log::warn!("chat rejected with HTTP {}: {}", status, message);
        return Err(ApiError::Chat(message));
    }

    response
        .json::<ChatResponse>()
        .await
        .map_err(|e| ApiError::Chat(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_used_verbatim() {
        assert_eq!(error_message(r#"{"detail":"bad file"}"#, UPLOAD_FALLBACK), "bad file");
    }

    #[test]
    fn test_fallback_when_detail_missing() {
        assert_eq!(error_message("{}", UPLOAD_FALLBACK), "Upload failed");
        assert_eq!(error_message(r#"{"detail":null}"#, CHAT_FALLBACK), "Failed to get response");
    }

    #[test]
    fn test_fallback_when_body_is_not_json() {
        assert_eq!(error_message("Internal Server Error", CHAT_FALLBACK), CHAT_FALLBACK);
        assert_eq!(error_message("", UPLOAD_FALLBACK), UPLOAD_FALLBACK);
        assert_eq!(error_message(r#""just a string""#, UPLOAD_FALLBACK), UPLOAD_FALLBACK);
    }

    #[test]
    fn test_structured_detail_is_rendered_as_json() {
        let body = r#"{"detail":[{"loc":["body","file"],"msg":"field required"}]}"#;
        let message = error_message(body, UPLOAD_FALLBACK);
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_api_error_display_is_bare_message() {
        assert_eq!(ApiError::Upload("bad file".into()).to_string(), "bad file");
        assert_eq!(ApiError::Chat("boom".into()).to_string(), "boom");
    }
}
