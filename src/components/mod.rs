//! UI Components
//!
//! Each component encapsulates its own presentation state, event handling,
//! and rendering logic. Components communicate through Actions rather than
//! direct state mutation.

pub mod alert_banners;
pub mod confirm_dialog;
pub mod form_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod table;

pub use confirm_dialog::ConfirmDialog;
pub use form_dialog::FormDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use table::DashboardTable;
