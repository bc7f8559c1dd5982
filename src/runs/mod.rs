//! Run lifecycle: start a run, then observe it until it settles.

mod controller;
mod state;

pub use controller::RunController;
pub use state::RunState;
