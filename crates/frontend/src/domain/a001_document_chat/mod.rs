//! Document Chat: upload a document, then talk to the assistant about it.

pub mod ui;
