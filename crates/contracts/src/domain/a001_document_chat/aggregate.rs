use serde::{Deserialize, Serialize};

/// Роль сообщения в чате
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Ответ `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub thread_id: String,
    pub filename: String,
    /// Приветствие ассистента, показывается как системное сообщение
    pub message: String,
}

/// Тело запроса `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub thread_id: String,
}

/// Ответ `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
    /// The backend echoes the thread back; the client keeps its own copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// Error body returned with non-2xx statuses.
///
/// `detail` is usually a string, but validation failures carry a list of
/// objects, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Human-readable detail, or `None` when the server gave nothing usable.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_match_wire_format() {
        for role in [ChatRole::System, ChatRole::User, ChatRole::Assistant] {
            let wire = serde_json::to_string(&role).unwrap();
            assert_eq!(wire, format!("\"{}\"", role.as_str()));
        }
        assert!(serde_json::from_str::<ChatRole>("\"bot\"").is_err());
    }

    #[test]
    fn test_chat_request_shape() {
        let req = ChatRequest {
            message: "hello".into(),
            thread_id: "t1".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "message": "hello", "thread_id": "t1" })
        );
    }

    #[test]
    fn test_chat_response_with_and_without_thread() {
        let plain: ChatResponse = serde_json::from_str(r#"{"response":"world"}"#).unwrap();
        assert_eq!(plain.response, "world");
        assert_eq!(plain.thread_id, None);

        let echoed: ChatResponse =
            serde_json::from_str(r#"{"response":"world","thread_id":"t1"}"#).unwrap();
        assert_eq!(echoed.thread_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_upload_response_requires_all_fields() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"thread_id":"t1","filename":"a.pdf","message":"hi"}"#)
                .unwrap();
        assert_eq!(ok.filename, "a.pdf");

        assert!(serde_json::from_str::<UploadResponse>(r#"{"thread_id":"t1"}"#).is_err());
    }

    #[test]
    fn test_error_detail_message() {
        let parse = |s: &str| serde_json::from_str::<ErrorResponse>(s).unwrap().message();

        assert_eq!(parse(r#"{"detail":"bad file"}"#).as_deref(), Some("bad file"));
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"detail":null}"#), None);
        assert_eq!(parse(r#"{"detail":""}"#), None);
        assert_eq!(
            parse(r#"{"detail":[{"msg":"field required"}]}"#).as_deref(),
            Some(r#"[{"msg":"field required"}]"#)
        );
    }
}
