//! Pending removal timers of error banners, keyed by entry id.
//!
//! Generic over the handle so it runs without a browser; in the app the
//! handle is `gloo_timers::callback::Timeout`, which cancels itself on drop.

use std::collections::HashMap;

pub struct BannerTimers<H> {
    pending: HashMap<u64, H>,
}

impl<H> Default for BannerTimers<H> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<H> BannerTimers<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handle for `banner_id`.
    ///
    /// Handles of banners that are gone (`is_live` false) are dropped first.
    /// A fired timer is therefore released here, never from inside its own
    /// callback.
    pub fn schedule(&mut self, banner_id: u64, handle: H, is_live: impl Fn(u64) -> bool) {
        self.pending.retain(|id, _| is_live(*id));
        self.pending.insert(banner_id, handle);
    }

    /// Drops, and so cancels, the handles of the given banners.
    pub fn cancel(&mut self, banner_ids: impl IntoIterator<Item = u64>) {
        for id in banner_ids {
            self.pending.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_document_chat::ui::chat::model::ApiError;
    use crate::domain::a001_document_chat::ui::chat::state::{ChatState, SendOutcome};
    use contracts::domain::a001_document_chat::UploadResponse;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts drops, standing in for a timer whose drop cancels it.
    struct Handle(Rc<Cell<u32>>);

    impl Drop for Handle {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn failed_send(state: &mut ChatState) -> u64 {
        let ticket = state.begin_send("hello").unwrap();
        match state.finish_send(&ticket, Err(ApiError::Chat("down".into()))) {
            SendOutcome::Failed { banner_id, .. } => banner_id,
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_cancels_pending_banner_timers() {
        let mut state = ChatState::new();
        state.select_file(Some("a.pdf"));
        let upload = state.begin_upload().unwrap();
        state.finish_upload(
            upload,
            Ok(UploadResponse {
                thread_id: "t1".into(),
                filename: "a.pdf".into(),
                message: "hi".into(),
            }),
        );

        let cancelled = Rc::new(Cell::new(0));
        let mut timers = BannerTimers::new();
        for _ in 0..2 {
            let id = failed_send(&mut state);
            timers.schedule(id, Handle(cancelled.clone()), |id| state.has_entry(id));
        }
        assert_eq!(timers.pending.len(), 2);
        assert_eq!(cancelled.get(), 0);

        timers.cancel(state.reset());

        assert!(timers.pending.is_empty());
        assert_eq!(cancelled.get(), 2);
    }

    #[test]
    fn test_fired_timers_are_released_on_next_schedule() {
        let released = Rc::new(Cell::new(0));
        let mut timers = BannerTimers::new();

        timers.schedule(1, Handle(released.clone()), |_| true);
        timers.schedule(2, Handle(released.clone()), |_| true);
        assert_eq!(released.get(), 0);

        // banner 1 was dismissed by its own timer
        timers.schedule(3, Handle(released.clone()), |id| id != 1);

        assert!(!timers.pending.contains_key(&1));
        assert!(timers.pending.contains_key(&2));
        assert!(timers.pending.contains_key(&3));
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_cancel_ignores_unknown_ids() {
        let released = Rc::new(Cell::new(0));
        let mut timers = BannerTimers::new();
        timers.schedule(7, Handle(released.clone()), |_| true);

        timers.cancel([1, 2, 3]);

        assert!(timers.pending.contains_key(&7));
        assert_eq!(released.get(), 0);
    }
}
