use std::time::Duration;

use http::{HeaderMap, HeaderValue, header};
use reqwest::Client;

/// HTTP client shared by every provider adapter
///
/// `timeout` bounds the whole upstream exchange, including the streamed
/// body. `None` leaves the call unbounded.
pub(crate) fn http_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    let mut builder = Client::builder()
        .user_agent(concat!("voxgate/", env!("CARGO_PKG_VERSION")))
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}
