//! Document Chat UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: API functions and `ApiError`
//! - state.rs: ChatState, the screen/session state machine
//! - banner_timers.rs: pending error-banner removals
//! - view_model.rs: DocumentChatVm, signals plus DOM and timer side effects
//! - view.rs: Main component DocumentChat

mod banner_timers;
mod model;
mod state;
mod view;
mod view_model;

pub use view::DocumentChat;
