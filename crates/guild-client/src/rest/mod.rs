//! REST plumbing: routes, the transport seam, and the HTTP implementation

mod error;
mod http;
mod route;
mod transport;

pub use error::{TransportError, TransportResult};
pub use http::HttpTransport;
pub use route::{Method, Route};
pub use transport::RestTransport;
