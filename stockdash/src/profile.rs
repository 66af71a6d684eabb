//! Investor profile collected at sign-up.

use serde::{Deserialize, Serialize};

pub const INVESTMENT_GOALS: [&str; 4] = ["Growth", "Income", "Balanced", "Conservative"];

pub const RISK_TOLERANCE: [&str; 3] = ["Low", "Medium", "High"];

pub const PREFERRED_INDUSTRIES: [&str; 5] = [
    "Technology",
    "Healthcare",
    "Finance",
    "Energy",
    "Consumer Goods",
];

/// ISO 3166 code and display name.
pub const COUNTRIES: [(&str, &str); 12] = [
    ("US", "United States"),
    ("CA", "Canada"),
    ("GB", "United Kingdom"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("NL", "Netherlands"),
    ("ES", "Spain"),
    ("IN", "India"),
    ("JP", "Japan"),
    ("SG", "Singapore"),
    ("AU", "Australia"),
    ("BR", "Brazil"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub investment_goals: String,
    pub risk_tolerance: String,
    pub preferred_industry: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            investment_goals: "Growth".to_string(),
            risk_tolerance: "Medium".to_string(),
            preferred_industry: "Technology".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_offered_options() {
        let profile = Profile::default();
        assert!(INVESTMENT_GOALS.contains(&profile.investment_goals.as_str()));
        assert!(RISK_TOLERANCE.contains(&profile.risk_tolerance.as_str()));
        assert!(PREFERRED_INDUSTRIES.contains(&profile.preferred_industry.as_str()));
    }
}
