//! Data Transfer Objects for Web API.

pub mod extract;
pub mod request;
pub mod response;

pub use extract::ContactJson;
pub use request::*;
pub use response::*;
