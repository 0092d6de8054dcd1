use crate::audit::domain::Recommendation;
use std::collections::BTreeMap;

/// RecommendationGrouper service bucketing Advisor recommendations by category
pub struct RecommendationGrouper;

impl RecommendationGrouper {
    /// Groups recommendations by category name
    ///
    /// Categories come out in name order; within a category, higher impact
    /// sorts first and the Advisor order is otherwise kept.
    pub fn group(recommendations: Vec<Recommendation>) -> BTreeMap<String, Vec<Recommendation>> {
        let mut grouped: BTreeMap<String, Vec<Recommendation>> = BTreeMap::new();

        for recommendation in recommendations {
            grouped
                .entry(recommendation.category.clone())
                .or_default()
                .push(recommendation);
        }

        for items in grouped.values_mut() {
            items.sort_by_key(|r| r.impact);
        }

        grouped
    }
}
