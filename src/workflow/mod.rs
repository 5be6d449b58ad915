//! Interactive review workflow
//!
//! State machine, display seam, and the controller that ties services
//! and UI together for one reviewer session.

pub mod controller;
pub mod state;
pub mod ui;

pub use controller::ReviewController;
pub use state::{ReviewState, SessionStateMachine};
pub use ui::{ConsoleUi, EditorAction, QueueChoice, ReviewUi};
