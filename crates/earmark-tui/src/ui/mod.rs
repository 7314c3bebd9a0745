//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, login screen and overlays
//! - `home`: the three panes of the home screen
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling

pub mod home;
pub mod input;
pub mod render;
pub mod styles;
