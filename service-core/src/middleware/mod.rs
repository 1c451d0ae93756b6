pub mod metrics;
pub mod security_headers;
pub mod tracing;

pub use self::metrics::metrics_middleware;
pub use self::security_headers::{DOCS_PATH, OPENAPI_PATH, security_headers_middleware};
pub use self::tracing::{request_id_middleware, REQUEST_ID_HEADER};
