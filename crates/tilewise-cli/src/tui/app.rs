use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// An interactive application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first event; configures tick rate and render mode.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Key presses, resizes and other terminal input.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application state once per tick.
    fn update(&mut self, tui: &mut Tui);
}
