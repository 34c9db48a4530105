//! Tick/render event loop shared by the interactive screens.

pub use self::{
    app::App,
    event_loop::{RenderMode, TuiEvent},
    runtime::Tui,
};

mod app;
mod event_loop;
mod runtime;
