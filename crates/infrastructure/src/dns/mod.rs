pub mod transport;

pub use transport::{create_resolver, NullResolver, TcpResolver, UdpResolver};
