pub mod http;
pub mod transport;
pub mod types;

pub use http::HttpTransport;
pub use transport::{Query, Resource, Transport, TransportError};
pub use types::{Advertisement, NewsArticle, Severity, ThreatScore};
