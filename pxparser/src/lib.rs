#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod date;
mod endpoint;
mod error;
pub mod extract;
pub mod model;
pub mod session;

pub use client::Client;
pub use endpoint::{DEFAULT_HOST, WebEndpoint};
pub use error::{Error, Result};
pub use model::{Artwork, IllustId, PageNum, UserId};
pub use reqwest;
pub use session::{Session, SessionOptions, Transport};
