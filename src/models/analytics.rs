use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    #[serde(default)]
    pub month: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub open_tickets: u32,
    /// Porcentaje (ej. 2.4 = 2.4%)
    #[serde(default)]
    pub doa_rate: f64,
    #[serde(default)]
    pub doa_above_target: bool,
    #[serde(default)]
    pub reship_cost: MonthTotal,
    #[serde(default)]
    pub refunds: MonthTotal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoaByChannel {
    pub channel: String,
    #[serde(default)]
    pub doa_rate: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoaByChannelResponse {
    #[serde(default)]
    pub doa_by_channel: Vec<DoaByChannel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_tolerates_missing_blocks() {
        let o: AnalyticsOverview =
            serde_json::from_str(r#"{"openTickets": 12, "doaRate": 3.5, "doaAboveTarget": true}"#).unwrap();
        assert_eq!(o.open_tickets, 12);
        assert!(o.doa_above_target);
        assert_eq!(o.reship_cost.month, 0.0);
    }

    #[test]
    fn doa_by_channel_is_wrapped() {
        let r: DoaByChannelResponse =
            serde_json::from_str(r#"{"doaByChannel": [{"channel": "amazon", "doaRate": 4.2}]}"#).unwrap();
        assert_eq!(r.doa_by_channel[0].channel, "amazon");
    }
}
