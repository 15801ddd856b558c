//! View state painted by the binder and read by the activity.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::binder::{Notice, Surface, ToggleLabel};
use crate::catalog::Catalog;
use crate::gradient::Gradient;
use crate::selection::ColorId;
use crate::swatch::Swatch;
use crate::toast::ToastQueue;

/// Everything the screen shows.
///
/// The binder drives it through [`Surface`]; the activity owns the cursor.
#[derive(Debug)]
pub struct ViewState {
    pub swatches: Vec<Swatch>,
    pub catalog: Option<Catalog>,
    pub cursor: usize,
    pub show_help: bool,
    selected: HashSet<ColorId>,
    active: Option<ColorId>,
    background: Option<Gradient>,
    label: ToggleLabel,
    toasts: ToastQueue,
    dirty: bool,
}

impl ViewState {
    pub fn new(
        swatches: Vec<Swatch>,
        catalog: Option<Catalog>,
        toast_duration: Duration,
        max_toasts: usize,
    ) -> Self {
        Self {
            swatches,
            catalog,
            cursor: 0,
            show_help: false,
            selected: HashSet::new(),
            active: None,
            background: None,
            label: ToggleLabel::Start,
            toasts: ToastQueue::new(toast_duration, max_toasts),
            dirty: true,
        }
    }

    pub fn is_selected(&self, id: &ColorId) -> bool {
        self.selected.contains(id)
    }

    pub fn active(&self) -> Option<&ColorId> {
        self.active.as_ref()
    }

    pub fn background(&self) -> Option<&Gradient> {
        self.background.as_ref()
    }

    pub fn label(&self) -> ToggleLabel {
        self.label
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        let cursor = cursor.min(self.swatches.len().saturating_sub(1));
        if cursor != self.cursor {
            self.cursor = cursor;
            self.dirty = true;
        }
    }

    /// Drop expired toasts; marks the view dirty when one disappeared.
    pub fn expire_toasts(&mut self, now: Instant) {
        let before = self.toasts.visible(now).count();
        self.toasts.prune(now);
        if self.toasts.visible(now).count() != before {
            self.dirty = true;
        }
    }

    /// Whether components need remounting since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn find(&self, id: &ColorId) -> Option<&Swatch> {
        self.swatches.iter().find(|s| &s.id == id)
    }
}

impl Surface for ViewState {
    fn has_swatch(&self, id: &ColorId) -> bool {
        self.find(id).is_some()
    }

    fn swatch_gradient(&self, id: &ColorId) -> Option<Gradient> {
        self.find(id).map(Swatch::gradient)
    }

    fn mark_selected(&mut self, id: &ColorId) {
        self.selected.insert(id.clone());
        self.dirty = true;
    }

    fn set_active(&mut self, id: Option<&ColorId>) {
        self.active = id.cloned();
        self.dirty = true;
    }

    fn set_background(&mut self, gradient: &Gradient) {
        self.background = Some(gradient.clone());
        self.dirty = true;
    }

    fn set_toggle_label(&mut self, label: ToggleLabel) {
        self.label = label;
        self.dirty = true;
    }

    fn notify(&mut self, notice: Notice) {
        self.toasts.push(notice.to_string(), Instant::now());
        self.dirty = true;
    }

    fn reload_defaults(&mut self) {
        self.selected.clear();
        self.active = None;
        self.background = None;
        self.toasts.clear();
        self.dirty = true;
    }
}
