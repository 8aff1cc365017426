pub mod traits;
pub mod http;

pub use http::{HttpProvider, DEFAULT_ENDPOINT};
pub use traits::*;
