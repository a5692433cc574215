use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level configuration for Boardroom.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardroomConfig {
    pub agents: AgentsConfig,
}

/// Configuration for the agent layer: the advisor roster plus fallback
/// decision thresholds applied when a request's context omits them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentsConfig {
    /// Hurdle rate used when the caller's context carries none.
    pub default_required_rate: Decimal,
    /// Longest acceptable payback period (years) when the context carries none.
    pub default_max_payback_period: Decimal,
    pub advisors: Vec<AdvisorConfig>,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            default_required_rate: Decimal::new(10, 2),
            default_max_payback_period: Decimal::from(3),
            advisors: vec![
                AdvisorConfig {
                    id: "strategy".to_string(),
                    kind: "strategy".to_string(),
                    name: "Strategic Planning Agent".to_string(),
                    description: "Specializes in long-term business strategy and planning"
                        .to_string(),
                    enabled: true,
                },
                AdvisorConfig {
                    id: "finance".to_string(),
                    kind: "finance".to_string(),
                    name: "Financial Advisory Agent".to_string(),
                    description: "Specializes in financial analysis and recommendations"
                        .to_string(),
                    enabled: true,
                },
                AdvisorConfig {
                    id: "leadership".to_string(),
                    kind: "leadership".to_string(),
                    name: "Leadership Development Agent".to_string(),
                    description: "Specializes in leadership assessment and development"
                        .to_string(),
                    enabled: true,
                },
            ],
        }
    }
}

/// Configuration for a single advisory agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisorConfig {
    pub id: String,
    /// Which advisor implementation to run (`finance`, `strategy`,
    /// `leadership`). Defaults to the id, so simple configs only name ids.
    #[serde(default)]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

impl AdvisorConfig {
    pub fn advisor_kind(&self) -> &str {
        if self.kind.is_empty() {
            &self.id
        } else {
            &self.kind
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn roundtrip_config() {
        let config = BoardroomConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BoardroomConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn default_config_has_three_advisors() {
        let agents = AgentsConfig::default();
        assert_eq!(agents.advisors.len(), 3);
        assert!(agents.advisors.iter().all(|a| a.enabled));
        assert_eq!(agents.default_required_rate, dec!(0.10));
        assert_eq!(agents.default_max_payback_period, dec!(3));
    }

    #[test]
    fn config_from_toml() {
        let toml_str = r#"
[agents]
default_required_rate = "0.12"
default_max_payback_period = "4"

[[agents.advisors]]
id = "cfo"
kind = "finance"
name = "Financial Advisory Agent"
description = "Financial analysis"
enabled = true

[[agents.advisors]]
id = "strategy"
name = "Strategic Planning Agent"
description = "Strategy"
enabled = false
"#;

        let config: BoardroomConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agents.default_required_rate, dec!(0.12));
        assert_eq!(config.agents.advisors.len(), 2);
        assert_eq!(config.agents.advisors[0].advisor_kind(), "finance");
        // Omitted kind falls back to the id.
        assert_eq!(config.agents.advisors[1].advisor_kind(), "strategy");
        assert!(!config.agents.advisors[1].enabled);
    }
}
