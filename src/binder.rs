//! Binds user actions to the session and reflects state onto a [`Surface`].
//!
//! The binder is the only code that talks to presentation. It never hands out
//! mutable access to the selection or rotation state.

use std::fmt;
use std::time::Instant;

use crate::chat_context::SelectionContext;
use crate::gradient::Gradient;
use crate::persistence::KeyValueStore;
use crate::rotation::{RotationError, StartOutcome, Tick};
use crate::selection::{ColorId, SelectionError};
use crate::session::Session;

/// Label of the start/stop control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleLabel {
    #[default]
    Start,
    Stop,
}

impl fmt::Display for ToggleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("START CAROUSEL"),
            Self::Stop => f.write_str("STOP CAROUSEL"),
        }
    }
}

/// Transient user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// First color picked
    SelectSecond {
        name: String,
    },
    /// Second color picked, carousel can start
    ReadyToStart,
    /// Start refused
    InsufficientSelection {
        required: usize,
    },
    Started,
    Stopped,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectSecond { name } => write!(
                f,
                "{name} selected. Select a 2nd color to start the carousel"
            ),
            Self::ReadyToStart => f.write_str("Ready! Start the carousel"),
            Self::InsufficientSelection { required } => {
                write!(f, "Select at least {required} colors for the carousel")
            }
            Self::Started => f.write_str("Carousel started"),
            Self::Stopped => f.write_str("Carousel stopped"),
        }
    }
}

/// Presentation seam driven by the binder.
pub trait Surface {
    /// Whether a selectable element exists for `id`.
    fn has_swatch(&self, id: &ColorId) -> bool;
    /// Current rendered gradient of the element.
    fn swatch_gradient(&self, id: &ColorId) -> Option<Gradient>;
    fn mark_selected(&mut self, id: &ColorId);
    /// Carousel highlight; `None` clears it.
    fn set_active(&mut self, id: Option<&ColorId>);
    /// Paint the shared container.
    fn set_background(&mut self, gradient: &Gradient);
    fn set_toggle_label(&mut self, label: ToggleLabel);
    fn notify(&mut self, notice: Notice);
    /// Return every element to its initial look.
    fn reload_defaults(&mut self);
}

/// Coordinator front door: one per session.
pub struct UiBinder<S, K> {
    session: Session<K>,
    surface: S,
}

impl<S: Surface, K: KeyValueStore> UiBinder<S, K> {
    pub fn new(session: Session<K>, surface: S) -> Self {
        Self { session, surface }
    }

    pub fn session(&self) -> &Session<K> {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for view-only state (cursor, scrolling).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Selected ids in click order, for read-only consumers such as a chat layer.
    pub fn selection(&self) -> &[ColorId] {
        self.session.selection.all()
    }

    /// Selection plus metadata, ready for prompt enrichment.
    pub fn context(&self) -> SelectionContext {
        SelectionContext::new(self.selection(), self.session.catalog.as_ref())
    }

    pub fn is_running(&self) -> bool {
        self.session.rotation.is_running()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.rotation.next_deadline()
    }

    /// Restore persisted state and paint it. Call once per session.
    pub fn startup(&mut self) -> Result<(), SelectionError> {
        let snapshot = self.session.persistence.load_snapshot();
        self.session.selection.restore(snapshot.selection)?;

        for id in self.session.selection.all() {
            if self.surface.has_swatch(id) {
                self.surface.mark_selected(id);
            } else {
                tracing::debug!(%id, "persisted color no longer on the page, skipping");
            }
        }

        if let Some(gradient) = snapshot.last_gradient {
            self.surface.set_background(&gradient);
        }
        self.surface.set_toggle_label(ToggleLabel::Start);

        tracing::info!(restored = self.session.selection.len(), "session restored");
        Ok(())
    }

    /// Handle a click on a swatch.
    pub fn click(&mut self, id: &ColorId) {
        if !self.surface.has_swatch(id) {
            tracing::debug!(%id, "click on unknown swatch ignored");
            return;
        }

        if let Some(gradient) = self.surface.swatch_gradient(id) {
            self.surface.set_background(&gradient);
            self.session.persistence.save_gradient(&gradient);
        }

        self.log_color_info(id);

        let result = self.session.selection.add(id.clone());
        if !result.added {
            return;
        }

        self.surface.mark_selected(id);
        self.session
            .persistence
            .save_selection(self.session.selection.all());
        tracing::info!(%id, size = result.new_size, "color selected");

        match result.new_size {
            1 => {
                let name = self.display_name(id);
                self.surface.notify(Notice::SelectSecond { name });
            }
            2 => self.surface.notify(Notice::ReadyToStart),
            _ => {}
        }
    }

    /// Start/stop control.
    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.stop();
            return;
        }
        if let Err(e) = self.start(now) {
            tracing::debug!(error = %e, "toggle left the carousel stopped");
        }
    }

    /// Start the carousel, reporting the outcome on the surface.
    pub fn start(&mut self, now: Instant) -> Result<StartOutcome, RotationError> {
        match self.session.rotation.start(&self.session.selection, now) {
            Ok(StartOutcome::Started) => {
                self.surface.set_toggle_label(ToggleLabel::Stop);
                self.surface.notify(Notice::Started);
                Ok(StartOutcome::Started)
            }
            Ok(StartOutcome::AlreadyRunning) => Ok(StartOutcome::AlreadyRunning),
            Err(e @ RotationError::InsufficientSelection { required, .. }) => {
                tracing::info!(error = %e, "carousel start refused");
                self.surface
                    .notify(Notice::InsufficientSelection { required });
                Err(e)
            }
        }
    }

    /// Stop the carousel if it is running.
    pub fn stop(&mut self) {
        if self.session.rotation.stop() {
            self.show_stopped();
        }
    }

    /// Clear everything: rotation, persisted state, selection and visuals.
    pub fn reset(&mut self) {
        self.session.rotation.stop();
        self.session.persistence.clear_all();
        self.session.selection.clear();
        self.surface.reload_defaults();
        self.surface.set_toggle_label(ToggleLabel::Start);
        tracing::info!("session reset");
    }

    /// Run any carousel step that is due at `now`.
    pub fn pump(&mut self, now: Instant) {
        let Some(tick) = self.session.rotation.poll(&self.session.selection, now) else {
            return;
        };

        match tick {
            Tick::Advanced { id, .. } => {
                self.surface.set_active(Some(&id));
                match self.surface.swatch_gradient(&id) {
                    Some(gradient) => {
                        self.surface.set_background(&gradient);
                        self.session.persistence.save_gradient(&gradient);
                    }
                    None => tracing::debug!(%id, "carousel color has no swatch on the page"),
                }
            }
            Tick::Halted => self.show_stopped(),
        }
    }

    fn show_stopped(&mut self) {
        self.surface.set_active(None);
        self.surface.set_toggle_label(ToggleLabel::Start);
        self.surface.notify(Notice::Stopped);
    }

    fn display_name(&self, id: &ColorId) -> String {
        self.session
            .catalog
            .as_ref()
            .and_then(|c| c.name_of(id))
            .unwrap_or(id.as_str())
            .to_string()
    }

    fn log_color_info(&self, id: &ColorId) {
        let Some(info) = self.session.catalog.as_ref().and_then(|c| c.find(id)) else {
            return;
        };
        tracing::info!(
            name = %info.name,
            mood = %info.mood,
            associations = %info.associations.join(", "),
            "{}",
            info.description
        );
    }
}
