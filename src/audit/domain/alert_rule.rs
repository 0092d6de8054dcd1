/// One metric condition of an alert rule (`criteria.allOf[]`)
#[derive(Debug, Clone, PartialEq)]
pub struct AlertCriterion {
    pub time_aggregation: String,
    pub metric_name: String,
    pub operator: String,
    pub threshold: f64,
}

impl AlertCriterion {
    /// e.g. `Average Percentage CPU GreaterThan 80.00`
    pub fn describe(&self) -> String {
        format!(
            "{} {} {} {:.2}",
            self.time_aggregation, self.metric_name, self.operator, self.threshold
        )
    }
}

/// Metric alert rule as returned by `az monitor metrics alert list`
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRule {
    id: String,
    name: String,
    scopes: Vec<String>,
    criteria: Vec<AlertCriterion>,
}

impl AlertRule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scopes: Vec<String>,
        criteria: Vec<AlertCriterion>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scopes,
            criteria,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resource ids this rule monitors, as returned by Azure with casing preserved
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn criteria(&self) -> &[AlertCriterion] {
        &self.criteria
    }
}
