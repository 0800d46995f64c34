use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A source of trending terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    Google,
    Facebook,
    Instagram,
    TikTok,
    YouTube,
}

impl Platform {
    /// Fixed provider order used by the aggregator.
    pub const ALL: [Self; 5] = [
        Self::Google,
        Self::Facebook,
        Self::Instagram,
        Self::TikTok,
        Self::YouTube,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::TikTok => "TikTok",
            Self::YouTube => "YouTube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown platform: {s}"))
    }
}

/// Region name to volume, in the order the provider produced them.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionBreakdown(Vec<(String, u64)>);

impl RegionBreakdown {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, region: impl Into<String>, volume: u64) {
        self.0.push((region.into(), volume));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, region: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, volume)| *volume)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, volume)| (name.as_str(), *volume))
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, u64)> for RegionBreakdown {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for RegionBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, volume)| (name, volume)))
    }
}

/// One term/platform measurement produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendRecord {
    pub term: String,
    pub platform: Platform,
    pub volume: u64,
    pub regions: RegionBreakdown,
}

/// Positional projection of a stored trend row:
/// term, platform, volume, region, date collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTrendRow {
    pub term: String,
    pub platform: String,
    pub search_volume: i64,
    pub region: Option<String>,
    pub date_collected: String,
}
