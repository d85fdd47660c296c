pub mod error;
pub mod headers;
pub mod request;

pub use error::{GridOverrideError, Result};
pub use headers::{IndexHeaderSet, TRACE_HEADER};
pub use request::{GridOverrideRequest, OverrideValue};
