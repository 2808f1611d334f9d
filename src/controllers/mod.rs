//! Built-in resource types.

mod data;
mod media;

pub use data::DataController;
pub use media::MediaController;
