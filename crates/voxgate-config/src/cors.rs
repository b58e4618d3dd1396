use std::time::Duration;

use serde::Deserialize;

/// CORS configuration for browser clients calling the gateway directly
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins
    #[serde(default)]
    pub origins: AllowList,
    /// Allowed HTTP methods
    #[serde(default)]
    pub methods: AllowList,
    /// Allowed request headers
    #[serde(default)]
    pub headers: AllowList,
    /// Max age for preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// Either the wildcard `"*"` or an explicit list of values
///
/// A list containing `"*"` collapses to [`AllowList::Any`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowList {
    #[default]
    Any,
    Only(Vec<String>),
}

impl<'de> Deserialize<'de> for AllowList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        let values = match Raw::deserialize(deserializer)? {
            Raw::One(value) => vec![value],
            Raw::Many(values) => values,
        };

        if values.iter().any(|value| value == "*") {
            Ok(Self::Any)
        } else {
            Ok(Self::Only(values))
        }
    }
}
