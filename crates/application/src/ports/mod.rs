mod request_resolver;

pub use request_resolver::RequestResolver;
