pub mod banner;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod net;
pub mod renderer;
pub mod services;
pub mod state;
pub mod store;

// Convenient re-exports (so call sites can do `profiles::Registry`, etc.)
pub use commands::process_command;
pub use state::{
    registry::Registry,
    session::{ConnState, Session},
};
