use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::strategy::{Strategy, StrategyConfig};

/// Parse a timestamp from the formats the simulator emits
/// (RFC 3339 with offset, bare ISO date-time, bare date)
pub fn parse_point_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Everything the backend needs to run one simulation
#[derive(Debug, Clone, Serialize)]
pub struct SimulationRequest {
    pub symbol: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub strategy: Strategy,
    pub strategy_config: StrategyConfig,
}

/// Per-trading-day series returned by the simulator. Arrays are
/// index-aligned: entry `i` of each array describes the same day.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueSeries {
    #[serde(rename = "Date")]
    pub dates: Vec<String>,
    #[serde(rename = "Stock")]
    pub stock: Vec<f64>,
    #[serde(rename = "Signal")]
    pub signal: Vec<f64>,
    #[serde(rename = "Value")]
    pub portfolio_value: Vec<f64>,
}

impl ValueSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Index of a trade date within this series; trades reference days
    /// by the same serialized timestamp the Values group uses
    pub fn index_of_date(&self, date: &str) -> Option<usize> {
        self.dates.iter().position(|d| d == date)
    }
}

/// Buy executions: date, amount spent (as formatted by the backend),
/// and the strike price
#[derive(Debug, Clone, Deserialize)]
pub struct BuySeries {
    #[serde(rename = "Date")]
    pub dates: Vec<String>,
    #[serde(rename = "Bought")]
    pub amounts: Vec<String>,
    #[serde(rename = "BuyPrice")]
    pub prices: Vec<f64>,
}

/// Sell executions: date, proceeds, and the strike price
#[derive(Debug, Clone, Deserialize)]
pub struct SellSeries {
    #[serde(rename = "Date")]
    pub dates: Vec<String>,
    #[serde(rename = "Sells")]
    pub amounts: Vec<String>,
    #[serde(rename = "SellPrice")]
    pub prices: Vec<f64>,
}

/// One finished simulation as returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Values")]
    pub values: ValueSeries,
    #[serde(rename = "Buys")]
    pub buys: BuySeries,
    #[serde(rename = "Sells")]
    pub sells: SellSeries,
}

impl SimulationResponse {
    /// Check the index-alignment invariant: within each group all
    /// arrays must have the same length.
    pub fn validate(&self) -> Result<()> {
        let v = &self.values;
        if v.stock.len() != v.dates.len()
            || v.signal.len() != v.dates.len()
            || v.portfolio_value.len() != v.dates.len()
        {
            bail!(
                "Values arrays disagree on length: {} dates, {} stock, {} signal, {} value",
                v.dates.len(),
                v.stock.len(),
                v.signal.len(),
                v.portfolio_value.len()
            );
        }
        if self.buys.amounts.len() != self.buys.dates.len()
            || self.buys.prices.len() != self.buys.dates.len()
        {
            bail!("Buys arrays disagree on length");
        }
        if self.sells.amounts.len() != self.sells.dates.len()
            || self.sells.prices.len() != self.sells.dates.len()
        {
            bail!("Sells arrays disagree on length");
        }
        Ok(())
    }
}

/// A submitted request paired with its response, as shown in the
/// results list. Never mutated after creation, dropped on exit.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub request: SimulationRequest,
    pub response: SimulationResponse,
}

impl SimulationResult {
    pub fn new(request: SimulationRequest, response: SimulationResponse) -> Self {
        Self { request, response }
    }

    pub fn id(&self) -> &str {
        &self.response.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn request() -> SimulationRequest {
        SimulationRequest {
            symbol: "AAPL".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 28)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            strategy: Strategy::MeanReversion,
            strategy_config: StrategyConfig::default_for(Strategy::MeanReversion),
        }
    }

    fn response_json() -> serde_json::Value {
        json!({
            "Id": "7c2d3b9a-9f1e-4e1c-8a3e-2f14a8c0d951",
            "Values": {
                "Date": ["2024-01-02T00:00:00-05:00", "2024-01-03T00:00:00-05:00", "2024-01-04T00:00:00-05:00"],
                "Stock": [185.64, 184.25, 181.91],
                "Signal": [1.0, 0.0, -1.0],
                "Value": [185.64, 186.10, 184.02],
            },
            "Buys": {
                "Date": ["2024-01-02T00:00:00-05:00"],
                "Bought": ["185.64"],
                "BuyPrice": [185.64],
            },
            "Sells": {
                "Date": ["2024-01-04T00:00:00-05:00"],
                "Sells": ["184.02"],
                "SellPrice": [181.91],
            },
        })
    }

    #[test]
    fn request_serializes_with_wire_field_names_and_iso_dates() {
        let value = serde_json::to_value(request()).unwrap();
        let map = value.as_object().unwrap();

        assert_eq!(map["symbol"], json!("AAPL"));
        assert_eq!(map["strategy"], json!("MeanReversion"));
        assert_eq!(map["start_date"], json!("2024-01-02T09:30:00"));
        assert_eq!(map["end_date"], json!("2024-06-28T16:00:00"));
        assert_eq!(
            map["strategy_config"],
            json!({ "lookback_period": 14.0, "z_threshold": 2.0 })
        );
        assert_eq!(map.len(), 5, "no extra fields on the wire");
    }

    #[test]
    fn response_deserializes_from_backend_shape() {
        let response: SimulationResponse = serde_json::from_value(response_json()).unwrap();
        assert_eq!(response.id, "7c2d3b9a-9f1e-4e1c-8a3e-2f14a8c0d951");
        assert_eq!(response.values.len(), 3);
        assert_eq!(response.values.signal, vec![1.0, 0.0, -1.0]);
        assert_eq!(response.buys.amounts, vec!["185.64"]);
        assert_eq!(response.sells.prices, vec![181.91]);
        response.validate().unwrap();
    }

    #[test]
    fn validate_rejects_misaligned_arrays() {
        let mut raw = response_json();
        raw["Values"]["Signal"] = json!([1.0, 0.0]);
        let response: SimulationResponse = serde_json::from_value(raw).unwrap();
        assert!(response.validate().is_err());

        let mut raw = response_json();
        raw["Buys"]["BuyPrice"] = json!([]);
        let response: SimulationResponse = serde_json::from_value(raw).unwrap();
        assert!(response.validate().is_err());
    }

    #[test]
    fn trade_dates_map_back_to_value_indices() {
        let response: SimulationResponse = serde_json::from_value(response_json()).unwrap();
        assert_eq!(response.values.index_of_date(&response.buys.dates[0]), Some(0));
        assert_eq!(response.values.index_of_date(&response.sells.dates[0]), Some(2));
        assert_eq!(response.values.index_of_date("1999-01-01"), None);
    }

    #[test]
    fn point_dates_parse_across_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(parse_point_date("2024-01-02T00:00:00-05:00"), Some(expected));
        assert_eq!(parse_point_date("2024-01-02T00:00:00"), Some(expected));
        assert_eq!(parse_point_date("2024-01-02 00:00:00"), Some(expected));
        assert_eq!(parse_point_date("2024-01-02"), Some(expected));
        assert_eq!(parse_point_date("not a date"), None);
    }

    #[test]
    fn result_is_keyed_by_response_id() {
        let response: SimulationResponse = serde_json::from_value(response_json()).unwrap();
        let result = SimulationResult::new(request(), response);
        assert_eq!(result.id(), "7c2d3b9a-9f1e-4e1c-8a3e-2f14a8c0d951");
    }
}
