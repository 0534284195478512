// Catalog domain models - liquor records and their embedded collections.
//
// A Liquor exclusively owns its reviews and stores: they live only inside
// the parent document and disappear with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Upper bound for every score on a liquor (rating and profile).
pub const MAX_SCORE: f64 = 5.0;

/// Tasting profile, six scores in [0, 5].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub smoothness: f64,
    pub aroma: f64,
    pub complexity: f64,
    pub finish: f64,
    pub balance: f64,
    pub intensity: f64,
}

impl Profile {
    /// Same score on every axis.
    pub fn uniform(score: f64) -> Self {
        Self {
            smoothness: score,
            aroma: score,
            complexity: score,
            finish: score,
            balance: score,
            intensity: score,
        }
    }

    pub fn scores(&self) -> [(&'static str, f64); 6] {
        [
            ("smoothness", self.smoothness),
            ("aroma", self.aroma),
            ("complexity", self.complexity),
            ("finish", self.finish),
            ("balance", self.balance),
            ("intensity", self.intensity),
        ]
    }
}

/// A user review embedded in a liquor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Older documents may lack the field entirely
    #[serde(default)]
    pub likes: u64,
}

/// A retail listing embedded in a liquor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default)]
    pub price: u64,
}

/// Top-level catalog record for one beverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liquor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub rating: f64,
    #[serde(default, with = "image_base64")]
    pub image: Option<Vec<u8>>,
    pub profile: Profile,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub stores: Vec<Store>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List view of a liquor without its embedded collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiquorSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub rating: f64,
    #[serde(with = "image_base64")]
    pub image: Option<Vec<u8>>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Liquor> for LiquorSummary {
    fn from(liquor: &Liquor) -> Self {
        Self {
            id: liquor.id.clone(),
            name: liquor.name.clone(),
            kind: liquor.kind.clone(),
            description: liquor.description.clone(),
            rating: liquor.rating,
            image: liquor.image.clone(),
            updated_at: liquor.updated_at,
        }
    }
}

/// Input for creating a liquor.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLiquor {
    pub name: String,
    pub kind: String,
    pub description: String,
    pub rating: f64,
    pub image: Option<Vec<u8>>,
    pub profile: Profile,
}

/// Input for adding a store listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub price: u64,
}

/// How a review is addressed for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewRef {
    /// Stable identifier (preferred)
    Id(String),
    /// Position in the array at the moment the update is applied
    Position(usize),
}

impl std::fmt::Display for ReviewRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewRef::Id(id) => write!(f, "{}", id),
            ReviewRef::Position(index) => write!(f, "#{}", index),
        }
    }
}

// ============================================================================
// SORTING
// ============================================================================

/// Ordering for review listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    /// Most recently edited first
    #[default]
    RecencyDesc,
    /// Most liked first, ties broken by recency
    LikesDesc,
}

impl ReviewSort {
    /// Sort in place. Among equal keys, later array entries come first.
    pub fn sort(&self, reviews: &mut [Review]) {
        reviews.reverse();
        match self {
            ReviewSort::RecencyDesc => reviews.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            ReviewSort::LikesDesc => reviews.sort_by(|a, b| {
                (b.likes, b.updated_at).cmp(&(a.likes, a.updated_at))
            }),
        }
    }
}

impl FromStr for ReviewSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recency" | "updated_at" | "recent" => Ok(ReviewSort::RecencyDesc),
            "likes" | "popular" => Ok(ReviewSort::LikesDesc),
            other => Err(format!("unknown review sort '{}' (expected recency or likes)", other)),
        }
    }
}

/// Ordering for store listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreSort {
    /// Cheapest first, ties broken alphabetically
    #[default]
    PriceAsc,
    NameAsc,
}

impl StoreSort {
    pub fn sort(&self, stores: &mut [Store]) {
        match self {
            StoreSort::PriceAsc => stores.sort_by(|a, b| (a.price, &a.name).cmp(&(b.price, &b.name))),
            StoreSort::NameAsc => stores.sort_by(|a, b| a.name.cmp(&b.name)),
        }
    }
}

impl FromStr for StoreSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(StoreSort::PriceAsc),
            "name" => Ok(StoreSort::NameAsc),
            other => Err(format!("unknown store sort '{}' (expected price or name)", other)),
        }
    }
}

/// Raw image bytes travel as base64 text in JSON.
mod image_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(image: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match image {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text).map_err(serde::de::Error::custom))
            .transpose()
    }
}
