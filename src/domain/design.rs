//! The two places a purchasable design can originate from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A design saved from the garment designer tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomDesign {
    pub id: String,
    pub creator_id: String,
    pub name: String,
    pub product_id: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CustomDesignCreate {
    pub creator_id: String,
    pub name: String,
    pub product_id: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

/// A design a user submitted for sale in the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSubmission {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct SubmissionCreate {
    pub creator_id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
}
