//! Query identity types: what is being measured, and on which property.

use core::fmt;
use serde::{Deserialize, Serialize};

/// The entity a series is fetched for: free-text keyword(s) or a
/// pre-resolved topic identifier when the platform has disambiguated one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryIdentity {
    /// Free-text keyword(s) submitted to the platform.
    pub keyword: String,
    /// Pre-resolved topic identifier, when known. Takes precedence over the
    /// keyword at fetch time; disambiguation itself is out of scope here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
}

impl QueryIdentity {
    /// Identity for a plain keyword query.
    pub fn keyword(kw: impl Into<String>) -> Self {
        Self {
            keyword: kw.into(),
            topic_id: None,
        }
    }

    /// Identity for a pre-resolved topic.
    pub fn topic(kw: impl Into<String>, topic_id: impl Into<String>) -> Self {
        Self {
            keyword: kw.into(),
            topic_id: Some(topic_id.into()),
        }
    }

    /// The string actually submitted to the provider: topic id when present,
    /// otherwise the raw keyword.
    #[must_use]
    pub fn query_term(&self) -> &str {
        self.topic_id.as_deref().unwrap_or(&self.keyword)
    }
}

impl fmt::Display for QueryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.topic_id {
            Some(id) => write!(f, "{} ({id})", self.keyword),
            None => f.write_str(&self.keyword),
        }
    }
}

/// Property scope of a query: which platform vertical the interest samples
/// come from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PropertyScope {
    /// General web search.
    #[default]
    Web,
    /// YouTube search.
    #[serde(rename = "youtube")]
    YouTube,
    /// Image search.
    Images,
    /// News search.
    News,
    /// Shopping search.
    Shopping,
}

impl PropertyScope {
    /// Stable lowercase label used to name output series
    /// (e.g. `web_interest`, `youtube_interest`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::YouTube => "youtube",
            Self::Images => "images",
            Self::News => "news",
            Self::Shopping => "shopping",
        }
    }

    /// Name of the output series for this scope.
    #[must_use]
    pub fn series_name(self) -> String {
        format!("{}_interest", self.as_str())
    }
}

impl fmt::Display for PropertyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
