//! Blocking client for the TraderMade market data REST API.
//!
//! [`TraderMade`] exposes one method per remote operation. Each call checks its
//! arguments locally, builds a signed URL, performs the GET through a
//! [`Transport`] and returns the body parsed as a [`serde_json::Value`].

mod client;
mod encode;
mod errors;
mod request;
mod transport;
pub mod types;
pub mod validation;
pub use self::client::TraderMade;
pub use self::encode::url_encode;
pub use self::errors::Error;
pub use self::request::{Endpoint, RequestBuilder, DEFAULT_BASE_URL};
pub use self::transport::{HttpTransport, Transport};
