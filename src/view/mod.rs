pub mod controller;
pub mod format;
pub mod state;
pub mod typewriter;
