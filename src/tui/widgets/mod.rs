//! Widgets and view helpers for the portfolio page.

pub mod detail;
pub mod help_menu;
pub mod interactive_widget;
pub mod render_helpers;
pub mod selection;
pub mod status_bar;
pub mod theme;

pub use crossterm::event::KeyEvent;
pub use interactive_widget::InteractiveStatefulWidget;
