mod request;
mod response;

pub use request::ClientRequest;
pub use response::ClientResponse;
