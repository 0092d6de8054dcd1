//! Advisor recommendation view structs for read model

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationCategoryView {
    pub category: String,
    pub recommendations: Vec<RecommendationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub problem: String,
    /// `High`, `Medium`, `Low` or `Unknown`
    pub impact: String,
    pub impacted_field: String,
    pub impacted_value: String,
    pub resource_group: String,
}
