//! Swatch grid Component: the selectable colors.

use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::gradient::Gradient;
use crate::selection::ColorId;
use crate::tui::activity::{Msg, UserEvent};
use crate::tui::view::ViewState;
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

/// Swatches per grid row.
pub const GRID_COLUMNS: usize = 5;

/// Rows of one cell, borders included.
pub const CELL_HEIGHT: u16 = 5;

/// Marker drawn in front of selected swatches.
const SELECTED_MARK: &str = "●";

/// Render snapshot of one swatch.
#[derive(Debug, Clone)]
pub struct SwatchCell {
    pub id: ColorId,
    pub label: String,
    pub gradient: Gradient,
    pub selected: bool,
    pub active: bool,
}

/// Grid of swatches with a keyboard cursor.
pub struct SwatchGrid {
    props: Props,
    cells: Vec<SwatchCell>,
    cursor: usize,
}

impl SwatchGrid {
    pub fn new(cells: Vec<SwatchCell>, cursor: usize) -> Self {
        let cursor = cursor.min(cells.len().saturating_sub(1));
        Self {
            props: Props::default(),
            cells,
            cursor,
        }
    }

    /// Snapshot the swatches shown by `view`.
    pub fn from_view(view: &ViewState) -> Self {
        let cells = view
            .swatches
            .iter()
            .map(|swatch| SwatchCell {
                id: swatch.id.clone(),
                label: swatch.label(view.catalog.as_ref()).to_string(),
                gradient: swatch.gradient(),
                selected: view.is_selected(&swatch.id),
                active: view.active() == Some(&swatch.id),
            })
            .collect();
        Self::new(cells, view.cursor)
    }

    /// Rows needed to show every swatch.
    pub fn rows(count: usize) -> usize {
        count.div_ceil(GRID_COLUMNS)
    }

    fn move_cursor(&mut self, direction: CmdDirection) -> bool {
        if self.cells.is_empty() {
            return false;
        }
        let last = self.cells.len() - 1;
        let next = match direction {
            CmdDirection::Left => self.cursor.saturating_sub(1),
            CmdDirection::Right => (self.cursor + 1).min(last),
            CmdDirection::Up => self.cursor.checked_sub(GRID_COLUMNS).unwrap_or(self.cursor),
            CmdDirection::Down => {
                let below = self.cursor + GRID_COLUMNS;
                if below <= last { below } else { self.cursor }
            }
        };
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    fn draw_cell(&self, frame: &mut Frame, area: Rect, cell: &SwatchCell, focused: bool) {
        let mut block = Block::default().borders(Borders::ALL);
        if cell.active {
            block = block
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Yellow));
        } else if focused {
            block = block.border_style(Style::default().fg(Color::Cyan));
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let mut title = Vec::new();
        if cell.selected {
            title.push(Span::styled(
                format!("{SELECTED_MARK} "),
                Style::default().fg(Color::Green),
            ));
        }
        let mut label_style = Style::default();
        if focused {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        title.push(Span::styled(cell.label.as_str(), label_style));
        frame.render_widget(Paragraph::new(Line::from(title)), rows[0]);

        render_gradient(frame, rows[1], &cell.gradient);
    }
}

/// Fill `area` left to right with samples of `gradient`.
pub fn render_gradient(frame: &mut Frame, area: Rect, gradient: &Gradient) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = area.width as usize;
    let spans: Vec<Span> = (0..width)
        .map(|x| {
            let t = x as f32 / width.saturating_sub(1).max(1) as f32;
            match gradient.sample(t) {
                Some(rgb) => Span::styled(
                    " ",
                    Style::default().bg(Color::Rgb(rgb.red, rgb.green, rgb.blue)),
                ),
                None => Span::raw(" "),
            }
        })
        .collect();
    let lines = vec![Line::from(spans); area.height as usize];
    frame.render_widget(Paragraph::new(lines), area);
}

impl MockComponent for SwatchGrid {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Colors ").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.cells.is_empty() {
            frame.render_widget(Paragraph::new("No swatches configured"), inner);
            return;
        }

        let row_count = Self::rows(self.cells.len());
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CELL_HEIGHT); row_count])
            .split(inner);

        for (row_idx, row_area) in rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Ratio(1, GRID_COLUMNS as u32);
                    GRID_COLUMNS
                ])
                .split(*row_area);

            for (col_idx, col_area) in cols.iter().enumerate() {
                let idx = row_idx * GRID_COLUMNS + col_idx;
                if let Some(cell) = self.cells.get(idx) {
                    self.draw_cell(frame, *col_area, cell, idx == self.cursor);
                }
            }
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.cursor))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(direction) => {
                if self.move_cursor(direction) {
                    CmdResult::Changed(self.state())
                } else {
                    CmdResult::None
                }
            }
            Cmd::Submit => CmdResult::Submit(self.state()),
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for SwatchGrid {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        if !focused {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Keys outside the dispatcher's keymap
        let raw = match key_event.code {
            Key::Enter | Key::Char(' ') => Some(Cmd::Submit),
            Key::Char('h') => Some(Cmd::Move(CmdDirection::Left)),
            Key::Char('j') => Some(Cmd::Move(CmdDirection::Down)),
            Key::Char('k') => Some(Cmd::Move(CmdDirection::Up)),
            Key::Char('l') => Some(Cmd::Move(CmdDirection::Right)),
            _ => None,
        };

        let cmd = match raw {
            Some(cmd) => cmd,
            None => {
                let action = dispatcher().dispatch(&key_event)?;

                if let Some(msg) = handle_global_app_events(&action) {
                    return Some(msg);
                }

                match action {
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                        Cmd::Move(CmdDirection::Up)
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                        Cmd::Move(CmdDirection::Down)
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                        Cmd::Move(CmdDirection::Left)
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                        Cmd::Move(CmdDirection::Right)
                    }
                    _ => return None,
                }
            }
        };

        match self.perform(cmd) {
            CmdResult::Changed(_) => Some(Msg::CursorMoved(self.cursor)),
            CmdResult::Submit(_) => self
                .cells
                .get(self.cursor)
                .map(|c| Msg::Click(c.id.clone())),
            _ => None,
        }
    }
}
