//! Interactive TUI for picking colors and running the carousel.
//!
//! The screen's [`ViewState`] is the binder's presentation surface; the
//! activity forwards key messages to the binder and pumps the carousel after
//! every input poll.

mod activity;
mod components;
mod view;

use std::io::stdout;
use std::sync::LazyLock;

use color_eyre::eyre::{Result, WrapErr};
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher, defaults,
    keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};

use crate::binder::UiBinder;
use crate::config::AppConfig;
use crate::persistence::FileStore;
use crate::session::Session;

pub use view::ViewState;

use activity::{Context, ExitReason, MainActivity, Msg};

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Start or stop the carousel
    ToggleCarousel,
    /// Forget the selection and restore the default look
    Reset,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    config.bind(
        ActionBinding::builder()
            .action(AppAction::ToggleCarousel)
            .key(keys::char('s'))
            .description("Start/stop carousel")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::Reset)
            .key(keys::char('r'))
            .description("Reset selection")
            .build(),
    );

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Handle global application events that are common across all components.
/// Returns Some(Msg) if the action was handled, None otherwise.
fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(Msg::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(Msg::ShowHelp),
        AppAction::ToggleCarousel => Some(Msg::ToggleCarousel),
        AppAction::Reset => Some(Msg::Reset),
        _ => None,
    }
}

/// Build the binder for `config` and restore the persisted session.
pub fn open_binder(config: &AppConfig) -> Result<UiBinder<ViewState, FileStore>> {
    let session = Session::open(config);
    let view = ViewState::new(
        config.swatches.clone(),
        session.catalog.clone(),
        config.toast_duration(),
        config.toast.max_visible,
    );
    let mut binder = UiBinder::new(session, view);
    binder.startup().wrap_err("failed to restore the session")?;
    Ok(binder)
}

/// Run the interactive TUI until the user quits.
pub fn run(config: &AppConfig) -> Result<()> {
    let binder = open_binder(config)?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut activity = MainActivity::default();
    activity.on_create(Context { binder });

    let result = loop {
        if let Err(e) = activity.on_draw(&mut terminal) {
            break Err(e);
        }
        if let Some(ExitReason::Quit) = activity.will_umount() {
            break Ok(());
        }
    };

    if let Some(context) = activity.on_destroy() {
        tracing::info!(
            selected = context.binder.selection().len(),
            "session closed"
        );
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
