use serde::{Deserialize, Serialize};

/// Shown when an advertisement carries nothing displayable.
pub const AD_PLACEHOLDER: &str = "Your Ad Here";

/// Upper bound of the server's threat scale.
pub const MAX_THREAT_SCORE: f64 = 5.0;

/// A single article as returned by `GET /news`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub image_url: String,
    pub url: String,
}

/// The advertisement returned by `GET /ad`.
///
/// The server's ad schema is not fixed, so the payload is kept as-is and only
/// inspected for something to put on a banner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Advertisement(serde_json::Value);

impl Advertisement {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }

    /// Banner text: `title`, then `text`, then the placeholder.
    pub fn label(&self) -> &str {
        ["title", "text"]
            .iter()
            .filter_map(|key| self.0.get(key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(AD_PLACEHOLDER)
    }
}

/// Today's threat level as computed by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ThreatScore {
    pub score: f64,
    pub phrase: String,
}

/// Colour band for a threat score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Green
    Low,
    /// Yellow
    Elevated,
    /// Red
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Elevated => "elevated",
            Severity::High => "high",
        }
    }
}

impl ThreatScore {
    /// Position on the 0..=1 progress scale. Never panics on odd server values.
    pub fn fraction(&self) -> f64 {
        if self.score.is_nan() {
            return 0.0;
        }
        (self.score / MAX_THREAT_SCORE).clamp(0.0, 1.0)
    }

    pub fn severity(&self) -> Severity {
        let fraction = self.fraction();
        if fraction <= 0.3 {
            Severity::Low
        } else if fraction <= 0.7 {
            Severity::Elevated
        } else {
            Severity::High
        }
    }
}
