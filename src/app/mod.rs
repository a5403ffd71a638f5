mod edit;
mod loader;
mod navigation;
mod state;
mod ui;

pub use loader::PendingLoad;
pub use state::*;

#[cfg(test)]
mod tests;
