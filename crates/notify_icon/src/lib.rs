mod balloon;
pub use balloon::*;

mod binding;
pub use binding::*;

mod config;
pub use config::*;

mod effects;
pub use effects::*;

pub mod error;
pub use error::{Error, Result};

mod input;
pub use input::*;

mod model;
pub use model::*;

mod native;
pub use native::*;

mod registry;
pub use registry::*;

mod tray;
pub use tray::*;

#[cfg(test)]
mod testing;
