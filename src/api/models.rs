use serde::{Deserialize, Serialize};

/// One playable item on the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    /// Artwork image reference, used as the record face.
    #[serde(alias = "img")]
    pub artwork: String,
    /// Audio source reference handed to the native audio element.
    #[serde(alias = "src")]
    pub source: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artwork: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artwork: artwork.into(),
            source: source.into(),
        }
    }
}

/// Formats whole seconds as `m:ss`.
pub fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Formats a media clock value, `--:--` when it is not known yet.
pub fn format_clock(seconds: Option<f64>) -> String {
    match seconds {
        Some(value) if value.is_finite() && value >= 0.0 => format_duration(value.floor() as u32),
        _ => "--:--".to_string(),
    }
}
