use crate::{
    domain::Category,
    wheel::{Distribution, SpinObserver},
};

/// Buffers controller callbacks until the next frame is drawn.
#[derive(Default)]
pub(super) struct SpinFeed {
    dirty: bool,
    completed: Option<Category>,
}

impl SpinFeed {
    pub(super) fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(super) fn take_completed(&mut self) -> Option<Category> {
        self.completed.take()
    }
}

impl SpinObserver for SpinFeed {
    fn on_frame(&mut self, _offset: f64, _distribution: &Distribution) {
        self.dirty = true;
    }

    fn on_complete(&mut self, category: &Category) {
        self.completed = Some(category.clone());
    }
}
