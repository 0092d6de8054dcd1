mod alert_rule_assigner;
mod recommendation_grouper;

pub use alert_rule_assigner::AlertRuleAssigner;
pub use recommendation_grouper::RecommendationGrouper;
