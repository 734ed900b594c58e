//! Document Chat Domain Module
//!
//! DTO для загрузки документа и диалога с ассистентом по загруженному документу.

pub mod aggregate;

pub use aggregate::{ChatRequest, ChatResponse, ChatRole, ErrorResponse, UploadResponse};
