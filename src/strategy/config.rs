use serde::Serialize;

use crate::strategy::catalog::{MlFeature, Strategy, ML_FEATURES};

/// Parameter set for the selected strategy, one case per config shape.
///
/// Serializes untagged, so the wire form is the flat JSON object of the
/// active case's fields, which is the shape the backend's
/// `strategy_config` dict expects. The active case must always match
/// the selected strategy;
/// strategy switches go through [`StrategyConfig::default_for`] rather
/// than merging old values into the new shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StrategyConfig {
    None {},
    MeanReversion {
        lookback_period: f64,
        z_threshold: f64,
    },
    SmaCrossover {
        longterm_avg_period: f64,
        shortterm_avg_period: f64,
    },
    EmaCrossover {
        longterm_avg_period: f64,
        shortterm_avg_period: f64,
    },
    Momentum {
        momentum_period: f64,
        momentum_threshold: f64,
    },
    LinearRegressionMl {
        training_period: f64,
        features: Vec<MlFeature>,
    },
    SvrMl {
        training_period: f64,
        features: Vec<MlFeature>,
        c: f64,
        epsilon: f64,
    },
}

impl StrategyConfig {
    /// Registered default parameter set for a strategy
    pub fn default_for(strategy: Strategy) -> Self {
        match strategy {
            Strategy::None => StrategyConfig::None {},
            Strategy::MeanReversion => StrategyConfig::MeanReversion {
                lookback_period: 14.0,
                z_threshold: 2.0,
            },
            Strategy::SimpleMovingAverageCrossover => StrategyConfig::SmaCrossover {
                longterm_avg_period: 90.0,
                shortterm_avg_period: 14.0,
            },
            Strategy::ExponentialMovingAverageCrossover => StrategyConfig::EmaCrossover {
                longterm_avg_period: 90.0,
                shortterm_avg_period: 14.0,
            },
            Strategy::Momentum => StrategyConfig::Momentum {
                momentum_period: 14.0,
                momentum_threshold: 1.0,
            },
            Strategy::LinearRegressionMachineLearning => StrategyConfig::LinearRegressionMl {
                training_period: 60.0,
                features: ML_FEATURES[..2].to_vec(),
            },
            Strategy::SupportedVectorRegressionMachineLearning => StrategyConfig::SvrMl {
                training_period: 60.0,
                features: ML_FEATURES[..2].to_vec(),
                c: 100.0,
                epsilon: 0.01,
            },
        }
    }

    /// Whether this config case belongs to the given strategy
    pub fn matches(&self, strategy: Strategy) -> bool {
        matches!(
            (self, strategy),
            (StrategyConfig::None {}, Strategy::None)
                | (StrategyConfig::MeanReversion { .. }, Strategy::MeanReversion)
                | (
                    StrategyConfig::SmaCrossover { .. },
                    Strategy::SimpleMovingAverageCrossover
                )
                | (
                    StrategyConfig::EmaCrossover { .. },
                    Strategy::ExponentialMovingAverageCrossover
                )
                | (StrategyConfig::Momentum { .. }, Strategy::Momentum)
                | (
                    StrategyConfig::LinearRegressionMl { .. },
                    Strategy::LinearRegressionMachineLearning
                )
                | (
                    StrategyConfig::SvrMl { .. },
                    Strategy::SupportedVectorRegressionMachineLearning
                )
        )
    }

    /// Mutable access to a numeric field by its schema key
    pub fn numeric_field_mut(&mut self, key: &str) -> Option<&mut f64> {
        match self {
            StrategyConfig::None {} => None,
            StrategyConfig::MeanReversion {
                lookback_period,
                z_threshold,
            } => match key {
                "lookback_period" => Some(lookback_period),
                "z_threshold" => Some(z_threshold),
                _ => None,
            },
            StrategyConfig::SmaCrossover {
                longterm_avg_period,
                shortterm_avg_period,
            }
            | StrategyConfig::EmaCrossover {
                longterm_avg_period,
                shortterm_avg_period,
            } => match key {
                "longterm_avg_period" => Some(longterm_avg_period),
                "shortterm_avg_period" => Some(shortterm_avg_period),
                _ => None,
            },
            StrategyConfig::Momentum {
                momentum_period,
                momentum_threshold,
            } => match key {
                "momentum_period" => Some(momentum_period),
                "momentum_threshold" => Some(momentum_threshold),
                _ => None,
            },
            StrategyConfig::LinearRegressionMl {
                training_period, ..
            } => match key {
                "training_period" => Some(training_period),
                _ => None,
            },
            StrategyConfig::SvrMl {
                training_period,
                c,
                epsilon,
                ..
            } => match key {
                "training_period" => Some(training_period),
                "c" => Some(c),
                "epsilon" => Some(epsilon),
                _ => None,
            },
        }
    }

    /// Mutable access to the feature list, for the cases that carry one
    pub fn features_mut(&mut self) -> Option<&mut Vec<MlFeature>> {
        match self {
            StrategyConfig::LinearRegressionMl { features, .. }
            | StrategyConfig::SvrMl { features, .. } => Some(features),
            _ => None,
        }
    }
}

/// Input widget flavor for a config field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Numeric {
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
    },
    /// Multi-select over the fixed [`ML_FEATURES`] catalog
    MultiSelect,
}

/// One renderable config input, in schema order
#[derive(Debug, Clone, Copy)]
pub struct ConfigField {
    pub key: &'static str,
    pub kind: FieldKind,
}

const DAY_COUNT: FieldKind = FieldKind::Numeric {
    min: None,
    max: None,
    step: 1.0,
};

const MEAN_REVERSION_FIELDS: &[ConfigField] = &[
    ConfigField {
        key: "lookback_period",
        kind: DAY_COUNT,
    },
    ConfigField {
        key: "z_threshold",
        kind: FieldKind::Numeric {
            min: Some(0.0),
            max: Some(15.0),
            step: 0.1,
        },
    },
];

const CROSSOVER_FIELDS: &[ConfigField] = &[
    ConfigField {
        key: "longterm_avg_period",
        kind: DAY_COUNT,
    },
    ConfigField {
        key: "shortterm_avg_period",
        kind: DAY_COUNT,
    },
];

const MOMENTUM_FIELDS: &[ConfigField] = &[
    ConfigField {
        key: "momentum_period",
        kind: DAY_COUNT,
    },
    ConfigField {
        key: "momentum_threshold",
        kind: FieldKind::Numeric {
            min: None,
            max: None,
            step: 0.1,
        },
    },
];

const LINREG_FIELDS: &[ConfigField] = &[
    ConfigField {
        key: "training_period",
        kind: DAY_COUNT,
    },
    ConfigField {
        key: "features",
        kind: FieldKind::MultiSelect,
    },
];

const SVR_FIELDS: &[ConfigField] = &[
    ConfigField {
        key: "training_period",
        kind: DAY_COUNT,
    },
    ConfigField {
        key: "features",
        kind: FieldKind::MultiSelect,
    },
    ConfigField {
        key: "c",
        kind: FieldKind::Numeric {
            min: Some(0.01),
            max: Some(1000.0),
            step: 0.01,
        },
    },
    ConfigField {
        key: "epsilon",
        kind: FieldKind::Numeric {
            min: Some(0.001),
            max: Some(0.5),
            step: 0.01,
        },
    },
];

/// Ordered config inputs to render for a strategy; empty for `None`
pub fn config_schema(strategy: Strategy) -> &'static [ConfigField] {
    match strategy {
        Strategy::None => &[],
        Strategy::MeanReversion => MEAN_REVERSION_FIELDS,
        Strategy::SimpleMovingAverageCrossover => CROSSOVER_FIELDS,
        Strategy::ExponentialMovingAverageCrossover => CROSSOVER_FIELDS,
        Strategy::Momentum => MOMENTUM_FIELDS,
        Strategy::LinearRegressionMachineLearning => LINREG_FIELDS,
        Strategy::SupportedVectorRegressionMachineLearning => SVR_FIELDS,
    }
}

/// Display metadata for a config key, shared by the form and the results list
#[derive(Debug, Clone, Copy)]
pub struct ConfigLabel {
    pub label: &'static str,
    pub suffix: Option<&'static str>,
    pub description: &'static str,
}

const CONFIG_LABELS: &[(&str, ConfigLabel)] = &[
    (
        "lookback_period",
        ConfigLabel {
            label: "Lookback period",
            suffix: Some("days"),
            description: "The number of days to look back when evaluating the rolling average.",
        },
    ),
    (
        "z_threshold",
        ConfigLabel {
            label: "Z-threshold",
            suffix: None,
            description: "The threshold value for the Z-score to trigger trading signals.",
        },
    ),
    (
        "longterm_avg_period",
        ConfigLabel {
            label: "Long term average period",
            suffix: Some("days"),
            description: "The number of days over which the long-term moving average is calculated.",
        },
    ),
    (
        "shortterm_avg_period",
        ConfigLabel {
            label: "Short term average period",
            suffix: Some("days"),
            description: "The number of days over which the short-term moving average is calculated.",
        },
    ),
    (
        "momentum_period",
        ConfigLabel {
            label: "Momentum period",
            suffix: Some("days"),
            description: "The period for calculating momentum, reflecting the strength of recent price changes.",
        },
    ),
    (
        "momentum_threshold",
        ConfigLabel {
            label: "Momentum threshold",
            suffix: Some("%"),
            description: "The percentage level of momentum required to signal a trading action.",
        },
    ),
    (
        "training_period",
        ConfigLabel {
            label: "Training period",
            suffix: Some("days"),
            description: "The number of days of historical data used to train the machine learning model.",
        },
    ),
    (
        "features",
        ConfigLabel {
            label: "Features",
            suffix: None,
            description: "The list of features or indicators used as input to the machine learning model.",
        },
    ),
    (
        "c",
        ConfigLabel {
            label: "Regularization parameter",
            suffix: None,
            description: "The regularization parameter that controls the trade-off between \
                          maximizing the margin and minimizing classification error in the SVR model.",
        },
    ),
    (
        "epsilon",
        ConfigLabel {
            label: "\u{03b5}-Insensitive loss function",
            suffix: None,
            description: "The epsilon parameter defines the margin of tolerance where no penalty \
                          is given for errors.",
        },
    ),
];

/// Look up display metadata for a config key. Unregistered keys yield
/// `None` and are skipped by the results renderer.
pub fn config_label(key: &str) -> Option<&'static ConfigLabel> {
    CONFIG_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, l)| l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::catalog::ALL_STRATEGIES;
    use serde_json::json;

    #[test]
    fn schema_empty_only_for_none() {
        assert!(config_schema(Strategy::None).is_empty());
        for strategy in ALL_STRATEGIES.iter().filter(|s| **s != Strategy::None) {
            assert!(
                !config_schema(*strategy).is_empty(),
                "{:?} should have config fields",
                strategy
            );
        }
    }

    #[test]
    fn schema_keys_match_serialized_default_shape() {
        for strategy in ALL_STRATEGIES {
            let default = StrategyConfig::default_for(*strategy);
            let value = serde_json::to_value(&default).unwrap();
            let map = value.as_object().expect("config serializes as an object");

            let schema_keys: Vec<&str> = config_schema(*strategy).iter().map(|f| f.key).collect();
            assert_eq!(
                schema_keys.len(),
                map.len(),
                "{:?}: schema and serialized shape disagree on field count",
                strategy
            );
            for key in &schema_keys {
                assert!(map.contains_key(*key), "{:?} missing key {}", strategy, key);
            }
        }
    }

    #[test]
    fn defaults_match_registered_values() {
        let mr = StrategyConfig::default_for(Strategy::MeanReversion);
        assert_eq!(
            serde_json::to_value(&mr).unwrap(),
            json!({ "lookback_period": 14.0, "z_threshold": 2.0 })
        );

        let svr =
            StrategyConfig::default_for(Strategy::SupportedVectorRegressionMachineLearning);
        assert_eq!(
            serde_json::to_value(&svr).unwrap(),
            json!({
                "training_period": 60.0,
                "features": ["ShortTermAverage", "LongTermAverage"],
                "c": 100.0,
                "epsilon": 0.01,
            })
        );

        assert_eq!(
            serde_json::to_value(StrategyConfig::default_for(Strategy::None)).unwrap(),
            json!({})
        );
    }

    #[test]
    fn default_case_matches_its_strategy() {
        for strategy in ALL_STRATEGIES {
            assert!(StrategyConfig::default_for(*strategy).matches(*strategy));
        }
        assert!(!StrategyConfig::default_for(Strategy::Momentum).matches(Strategy::MeanReversion));
    }

    #[test]
    fn numeric_fields_are_reachable_by_schema_key() {
        for strategy in ALL_STRATEGIES {
            let mut config = StrategyConfig::default_for(*strategy);
            for field in config_schema(*strategy) {
                match field.kind {
                    FieldKind::Numeric { .. } => {
                        assert!(
                            config.numeric_field_mut(field.key).is_some(),
                            "{:?}: numeric key {} unreachable",
                            strategy,
                            field.key
                        );
                    }
                    FieldKind::MultiSelect => {
                        assert!(config.features_mut().is_some());
                    }
                }
            }
            assert!(config.numeric_field_mut("no_such_key").is_none());
        }
    }

    #[test]
    fn every_schema_key_has_a_label() {
        for strategy in ALL_STRATEGIES {
            for field in config_schema(*strategy) {
                assert!(
                    config_label(field.key).is_some(),
                    "missing label for {}",
                    field.key
                );
            }
        }
        assert!(config_label("unregistered_key").is_none());
    }
}
