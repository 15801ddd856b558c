//! The carousel screen: swatch grid, gradient menu panel and notifications.

use std::io::Stdout;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::{
    Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{Application, EventListenerCfg, PollStrategy};

use crate::binder::UiBinder;
use crate::persistence::FileStore;
use crate::selection::ColorId;
use crate::tui::components::{
    CELL_HEIGHT, EXTRA_BINDINGS, MAIN_FOOTER_ACTIONS, SwatchGrid, format_footer, render_gradient,
    render_help,
};
use crate::tui::view::ViewState;

/// Component identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Swatches,
}

/// Messages emitted by components.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    ShowHelp,
    CursorMoved(usize),
    Click(ColorId),
    ToggleCarousel,
    Reset,
}

/// Custom user events (currently unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

/// State shared with the activity for its lifetime.
pub struct Context {
    pub binder: UiBinder<ViewState, FileStore>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
}

/// The only screen of the application.
#[derive(Default)]
pub struct MainActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl MainActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    /// Remount the grid with the current view state.
    fn sync_components(app: &mut Application<Id, Msg, UserEvent>, view: &ViewState) -> Result<()> {
        let _ = app.umount(&Id::Swatches);
        app.mount(Id::Swatches, Box::new(SwatchGrid::from_view(view)), vec![])?;
        app.active(&Id::Swatches)?;
        Ok(())
    }

    pub fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        if let Err(e) = Self::sync_components(&mut app, context.binder.surface()) {
            tracing::error!("Failed to mount components: {}", e);
        }
        self.app = Some(app);
        self.context = Some(context);
    }

    pub fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_mut()) else {
            self.exit_reason = Some(ExitReason::Quit);
            return Ok(());
        };
        let binder = &mut context.binder;

        let now = Instant::now();
        binder.surface_mut().expire_toasts(now);
        if binder.surface_mut().take_dirty() {
            Self::sync_components(app, binder.surface())?;
        }

        terminal.draw(|frame| {
            let view = binder.surface();
            let grid_height = SwatchGrid::rows(view.swatches.len()) as u16 * CELL_HEIGHT + 2;

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),           // Title
                    Constraint::Length(grid_height), // Swatches
                    Constraint::Min(5),              // Menu
                    Constraint::Length(1),           // Footer
                ])
                .split(frame.area());

            let running = if binder.is_running() {
                "running"
            } else {
                "stopped"
            };
            let title = format!(
                " chromatix - {} selected - carousel {running} ",
                binder.selection().len()
            );
            frame.render_widget(
                Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
                rows[0],
            );

            app.view(&Id::Swatches, frame, rows[1]);

            draw_menu(frame, rows[2], &*binder, now);

            let footer = format_footer(MAIN_FOOTER_ACTIONS, EXTRA_BINDINGS);
            frame.render_widget(
                Paragraph::new(footer).style(Style::default().add_modifier(Modifier::DIM)),
                rows[3],
            );

            if view.show_help {
                render_help(frame);
            }
        })?;

        // The help modal takes all input while visible
        if binder.surface().show_help {
            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
                )
            {
                binder.surface_mut().show_help = false;
            }
            binder.pump(Instant::now());
            return Ok(());
        }

        if let Ok(messages) = app.tick(PollStrategy::Once) {
            for msg in messages {
                match msg {
                    Msg::Quit => {
                        self.exit_reason = Some(ExitReason::Quit);
                        return Ok(());
                    }
                    Msg::ShowHelp => binder.surface_mut().show_help = true,
                    Msg::CursorMoved(cursor) => binder.surface_mut().set_cursor(cursor),
                    Msg::Click(id) => binder.click(&id),
                    Msg::ToggleCarousel => binder.toggle(Instant::now()),
                    Msg::Reset => binder.reset(),
                }
            }
        }

        binder.pump(Instant::now());
        Ok(())
    }

    pub fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    pub fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}

/// The "menu" container: painted with the last gradient, holding the toggle
/// label, the selection and the toast stack.
fn draw_menu(
    frame: &mut ratatui::Frame,
    area: Rect,
    binder: &UiBinder<ViewState, FileStore>,
    now: Instant,
) {
    let view = binder.surface();
    let block = Block::default().title(" Menu ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(gradient) = view.background() {
        render_gradient(frame, inner, gradient);
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Toggle label
            Constraint::Length(1), // Selection
            Constraint::Min(0),    // Toasts
        ])
        .split(inner);

    let label_style = Style::default()
        .fg(Color::White)
        .bg(Color::Black)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {} ", view.label()),
            label_style,
        )))
        .alignment(Alignment::Center),
        sections[0],
    );

    let catalog = view.catalog.as_ref();
    let selection = binder
        .selection()
        .iter()
        .map(|id| catalog.and_then(|c| c.name_of(id)).unwrap_or(id.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    if !selection.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {selection} "),
                Style::default().fg(Color::Black).bg(Color::Gray),
            )))
            .alignment(Alignment::Center),
            sections[1],
        );
    }

    let toasts: Vec<Line> = view
        .toasts()
        .visible(now)
        .map(|toast| {
            Line::from(Span::styled(
                format!(" {} ", toast.message),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(toasts).alignment(Alignment::Right),
        sections[2],
    );
}
