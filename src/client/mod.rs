//! HTTP transport to the GraphQL endpoint.

mod transport;
mod upload;

pub use transport::*;
pub use upload::*;
