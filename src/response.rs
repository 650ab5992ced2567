use std::convert::Infallible;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    body::Incoming,
    header::{HeaderValue, CONTENT_TYPE},
    Request, Response, StatusCode,
};

pub const STATUS: StatusCode = StatusCode::OK;
pub const CONTENT_TYPE_TEXT_PLAIN: &str = "text/plain";
pub const BODY: &[u8] = b"jenkins test 1 - road\n";

/// The response every request gets. hyper fills in `content-length` from the
/// `Full` body.
pub fn fixed() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(BODY)));
    *response.status_mut() = STATUS;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static(CONTENT_TYPE_TEXT_PLAIN),
    );
    response
}

/// Request is never looked at, not even the body.
pub async fn handle(_req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(fixed())
}
