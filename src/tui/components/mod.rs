//! TUI components using tui-realm.

pub mod help;
pub mod swatch_grid;

pub use help::{EXTRA_BINDINGS, MAIN_FOOTER_ACTIONS, format_footer, render_help};
pub use swatch_grid::{CELL_HEIGHT, SwatchGrid, render_gradient};
