//! ferrous-resolve application layer: request/response correlation and the
//! public lookup API, written against the [`ports::RequestResolver`] port.
pub mod client;
pub mod ports;
pub mod services;

pub use client::{ClientRequest, ClientResponse};
pub use ports::RequestResolver;
pub use services::DnsClient;
