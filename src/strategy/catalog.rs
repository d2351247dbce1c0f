use serde::{Deserialize, Serialize};

/// Trading strategies understood by the simulator backend.
///
/// The variant names double as the wire identifiers the backend resolves
/// its strategy classes by, so they must not be renamed casually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    None,
    MeanReversion,
    SimpleMovingAverageCrossover,
    ExponentialMovingAverageCrossover,
    Momentum,
    LinearRegressionMachineLearning,
    SupportedVectorRegressionMachineLearning,
}

/// All strategies in selector order, the disabled placeholder first
pub const ALL_STRATEGIES: &[Strategy] = &[
    Strategy::None,
    Strategy::MeanReversion,
    Strategy::SimpleMovingAverageCrossover,
    Strategy::ExponentialMovingAverageCrossover,
    Strategy::Momentum,
    Strategy::LinearRegressionMachineLearning,
    Strategy::SupportedVectorRegressionMachineLearning,
];

impl Strategy {
    /// Human-readable selector label
    pub fn label(self) -> &'static str {
        match self {
            Strategy::None => "Select a strategy",
            Strategy::MeanReversion => "Mean reversion",
            Strategy::SimpleMovingAverageCrossover => "Simple moving average crossover",
            Strategy::ExponentialMovingAverageCrossover => "Exponential moving average crossover",
            Strategy::Momentum => "Momentum",
            Strategy::LinearRegressionMachineLearning => "Machine learning (linear regression)",
            Strategy::SupportedVectorRegressionMachineLearning => {
                "Machine learning (supported vector regression)"
            }
        }
    }

    /// Short description shown as hover help next to the selector
    pub fn description(self) -> &'static str {
        match self {
            Strategy::None => "",
            Strategy::MeanReversion => {
                "The Mean Reversion strategy is based on the idea that prices and returns \
                 eventually move back towards their historical average."
            }
            Strategy::SimpleMovingAverageCrossover => {
                "The Simple Moving Average (SMA) Crossover strategy identifies potential buy or \
                 sell signals based on the crossover of short-term and long-term moving averages."
            }
            Strategy::ExponentialMovingAverageCrossover => {
                "The Exponential Moving Average (EMA) Crossover strategy is similar to the SMA \
                 Crossover but gives more weight to recent prices, making it more responsive to \
                 price changes."
            }
            Strategy::Momentum => {
                "The Momentum strategy aims to capitalize on the continuation of existing trends \
                 in the market. It assumes that a security that is rising will continue to rise, \
                 and one that is falling will continue to fall."
            }
            Strategy::LinearRegressionMachineLearning => {
                "The Linear Regression Machine Learning strategy uses a statistical approach to \
                 predict future prices by fitting a linear relationship between the historical \
                 data and the target variable."
            }
            Strategy::SupportedVectorRegressionMachineLearning => {
                "The Supported Vector Regression (SVR) Machine Learning strategy applies a \
                 machine learning model that uses support vectors to predict future price \
                 movements. It is particularly effective in capturing complex relationships \
                 between input features."
            }
        }
    }
}

/// Selectable inputs for the machine-learning strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MlFeature {
    ShortTermAverage,
    LongTermAverage,
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MACD")]
    Macd,
    Volume,
}

/// The fixed feature catalog, in multi-select display order
pub const ML_FEATURES: &[MlFeature] = &[
    MlFeature::ShortTermAverage,
    MlFeature::LongTermAverage,
    MlFeature::Rsi,
    MlFeature::Macd,
    MlFeature::Volume,
];

impl MlFeature {
    pub fn label(self) -> &'static str {
        match self {
            MlFeature::ShortTermAverage => "Short term average",
            MlFeature::LongTermAverage => "Long term average",
            MlFeature::Rsi => "RSI",
            MlFeature::Macd => "MACD",
            MlFeature::Volume => "Volume",
        }
    }

    /// Reverse lookup from the wire name, for rendering stored configs
    pub fn from_wire_name(name: &str) -> Option<Self> {
        ML_FEATURES
            .iter()
            .copied()
            .find(|f| f.wire_name() == name)
    }

    /// Serialized identifier as it appears in request/response JSON
    pub fn wire_name(self) -> &'static str {
        match self {
            MlFeature::ShortTermAverage => "ShortTermAverage",
            MlFeature::LongTermAverage => "LongTermAverage",
            MlFeature::Rsi => "RSI",
            MlFeature::Macd => "MACD",
            MlFeature::Volume => "Volume",
        }
    }
}
