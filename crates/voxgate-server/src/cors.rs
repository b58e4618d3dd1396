use http::Method;
use http::header::HeaderName;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use voxgate_config::{AllowList, CorsConfig};

/// Build a Tower CORS layer from configuration
///
/// Unparseable entries are skipped with a warning.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    layer = match &config.origins {
        AllowList::Any => layer.allow_origin(AllowOrigin::any()),
        AllowList::Only(origins) => layer.allow_origin(parse_all::<http::HeaderValue>("origin", origins)),
    };

    layer = match &config.methods {
        AllowList::Any => layer.allow_methods(AllowMethods::any()),
        AllowList::Only(methods) => layer.allow_methods(parse_all::<Method>("method", methods)),
    };

    layer = match &config.headers {
        AllowList::Any => layer.allow_headers(AllowHeaders::any()),
        AllowList::Only(headers) => layer.allow_headers(parse_all::<HeaderName>("header", headers)),
    };

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}

fn parse_all<T: std::str::FromStr>(what: &str, values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| {
            let parsed = value.parse().ok();
            if parsed.is_none() {
                tracing::warn!(value = %value, "ignoring invalid CORS {what}");
            }
            parsed
        })
        .collect()
}
