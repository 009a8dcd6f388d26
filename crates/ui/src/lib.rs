//! Terminal UI shell: event pump, application state, and the render loop.

mod app;
mod events;
mod state;

pub use app::TuiApp;
pub use events::{EventHandler, UiEvent};
pub use state::{AppState, InputKind, Tab};
