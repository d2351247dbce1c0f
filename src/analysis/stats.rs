/// Percentage change from the first to the last value of a series.
///
/// Returns `None` for an empty series or a zero starting value, so a
/// degenerate baseline renders as "n/a" instead of a non-finite number.
pub fn percentage_gain_loss(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    let last = *values.last()?;
    if first == 0.0 {
        return None;
    }
    Some(100.0 * (last - first) / first)
}

/// Summary of a simulation run: strategy performance vs. just holding
/// the instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSummary {
    pub strategy_pct: Option<f64>,
    pub stock_pct: Option<f64>,
}

impl PerformanceSummary {
    pub fn compute(portfolio_values: &[f64], stock_values: &[f64]) -> Self {
        Self {
            strategy_pct: percentage_gain_loss(portfolio_values),
            stock_pct: percentage_gain_loss(stock_values),
        }
    }

    /// True iff both percentages are defined and the strategy did better
    pub fn beat_market(&self) -> bool {
        match (self.strategy_pct, self.stock_pct) {
            (Some(strategy), Some(stock)) => strategy > stock,
            _ => false,
        }
    }

    /// Margin between the strategy and the instrument, when defined
    pub fn margin(&self) -> Option<f64> {
        Some(self.strategy_pct? - self.stock_pct?)
    }
}
