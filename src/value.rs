use std::fmt;
use std::str::FromStr;

/// Sentinel: defer to the Cloud SDK's active configuration.
pub const GCLOUD_CONFIG: &str = "GCLOUD_CONFIG";

/// Sentinel: read the value from `appengine-web.xml`.
pub const APPENGINE_CONFIG: &str = "APPENGINE_CONFIG";

/// A user-supplied project id or version, parsed once from its raw
/// string form.
///
/// ```
/// use decolar::ConfigValue;
///
/// assert_eq!("GCLOUD_CONFIG".parse::<ConfigValue>().unwrap(), ConfigValue::Gcloud);
/// assert_eq!(ConfigValue::from("  "), ConfigValue::Unset);
/// assert_eq!(ConfigValue::from("v12"), ConfigValue::Literal("v12".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigValue {
    /// Not configured, or blank.
    #[default]
    Unset,
    /// Used as-is.
    Literal(String),
    /// `GCLOUD_CONFIG`.
    Gcloud,
    /// `APPENGINE_CONFIG`.
    Descriptor,
}

impl ConfigValue {
    /// Parse an optional raw value; `None` is [`ConfigValue::Unset`].
    #[must_use]
    pub fn parse_optional(raw: Option<&str>) -> Self {
        raw.map_or(Self::Unset, Self::from)
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<&str> for ConfigValue {
    fn from(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Unset;
        }
        match raw {
            GCLOUD_CONFIG => Self::Gcloud,
            APPENGINE_CONFIG => Self::Descriptor,
            literal => Self::Literal(literal.to_string()),
        }
    }
}

impl From<String> for ConfigValue {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl FromStr for ConfigValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::Literal(value) => f.write_str(value),
            Self::Gcloud => f.write_str(GCLOUD_CONFIG),
            Self::Descriptor => f.write_str(APPENGINE_CONFIG),
        }
    }
}
