use std::fmt;

/// Advisor impact rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Impact {
    High,
    Medium,
    Low,
    Unknown,
}

impl Impact {
    /// Parses Advisor's impact string; anything unrecognized is `Unknown`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "high" => Impact::High,
            "medium" => Impact::Medium,
            "low" => Impact::Low,
            _ => Impact::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
            Impact::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Azure Advisor recommendation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub problem: String,
    pub impact: Impact,
    /// Resource type the recommendation applies to (`impactedField`)
    pub impacted_field: String,
    /// Name of the affected resource (`impactedValue`)
    pub impacted_value: String,
    pub resource_group: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_parse() {
        assert_eq!(Impact::parse("High"), Impact::High);
        assert_eq!(Impact::parse("medium"), Impact::Medium);
        assert_eq!(Impact::parse(" LOW "), Impact::Low);
        assert_eq!(Impact::parse("critical"), Impact::Unknown);
        assert_eq!(Impact::parse(""), Impact::Unknown);
    }

    #[test]
    fn test_impact_ordering_puts_high_first() {
        let mut impacts = vec![Impact::Low, Impact::Unknown, Impact::High, Impact::Medium];
        impacts.sort();
        assert_eq!(
            impacts,
            vec![Impact::High, Impact::Medium, Impact::Low, Impact::Unknown]
        );
    }
}
