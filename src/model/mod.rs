mod auth;
mod comment;
mod fixture;
mod projection;
mod standings;

pub use auth::*;
pub use comment::*;
pub use fixture::*;
pub use projection::*;
pub use standings::*;
