//! Component trait - Interface for UI components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

use crate::action::Action;
use crate::model::theme::Palette;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// Components are self-contained units that:
/// - Handle their own key events
/// - Maintain local presentation state
/// - Render themselves to a frame with the active theme palette
///
/// The pattern follows:
/// 1. `handle_key_event` - Convert events to Actions
/// 2. `update` - Process Actions and update state
/// 3. `draw` - Render the component
pub trait Component {
    /// Handle a key event, returning an optional Action
    ///
    /// This method converts key events into semantic Actions.
    /// The component should not modify shared state here - just return
    /// the appropriate Action.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Update component state based on an Action
    ///
    /// This is where state changes happen. The method can optionally
    /// return a new Action if the update should trigger another action.
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Draw the component to the frame
    ///
    /// This method should be pure rendering - no state changes beyond
    /// clamping scroll positions to the available area.
    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()>;
}
