pub mod http;

pub use http::{get, http_get, http_status_is_ok, https_get, BoxError, ResponseData};
pub use hyper::Uri;
