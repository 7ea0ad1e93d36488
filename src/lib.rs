pub use client::TourneyClient;
pub use error::{Result, TourneyError};
pub use feed::*;
pub use model::*;

mod api;
mod client;
pub mod error;
mod feed;
pub mod model;
