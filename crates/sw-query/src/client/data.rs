use chrono::{DateTime, Utc};
use tracing::instrument;

use solarweb_client::Result;

use crate::hist::HistoricalValues;
use crate::pvsystem::{AggrData, FlowData};

use super::{DEFAULT_PERIOD, DEFAULT_TIMEZONE};

/// Second precision, UTC, `Z` suffix.
const HIST_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

impl super::SolarWebClient {
    /// Get the current power flow of a PV system.
    ///
    /// `timezone` defaults to `zulu`; the API also accepts `local`.
    #[instrument(skip(self))]
    pub async fn flow_data(
        &self,
        pv_system_id: Option<&str>,
        timezone: Option<&str>,
    ) -> Result<FlowData> {
        let path = self.system_path(pv_system_id, "/flowdata")?;
        let request = self
            .get(&path)
            .query("timezone", timezone.unwrap_or(DEFAULT_TIMEZONE));
        self.send(request).await
    }

    /// Get aggregated values of a PV system.
    ///
    /// `period` defaults to `total`. Channels are sent as one comma-separated
    /// `channel` parameter; an empty slice requests all channels.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let years = client.aggr_data(None, Some("years"), &["EnergyProductionTotal"]).await?;
    /// ```
    #[instrument(skip(self))]
    pub async fn aggr_data(
        &self,
        pv_system_id: Option<&str>,
        period: Option<&str>,
        channels: &[&str],
    ) -> Result<AggrData> {
        let path = self.system_path(pv_system_id, "/aggrdata")?;
        let channel = (!channels.is_empty()).then(|| channels.join(","));
        let request = self
            .get(&path)
            .query("period", period.unwrap_or(DEFAULT_PERIOD))
            .query_opt("channel", channel);
        self.send(request).await
    }

    /// Get historical log entries of a PV system between `from` and `to`.
    #[instrument(skip(self))]
    pub async fn hist_data(
        &self,
        pv_system_id: Option<&str>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        channel: Option<&str>,
    ) -> Result<HistoricalValues> {
        let path = self.system_path(pv_system_id, "/histdata")?;
        let request = self
            .get(&path)
            .query("from", from.format(HIST_TIME_FORMAT).to_string())
            .query("to", to.format(HIST_TIME_FORMAT).to_string())
            .query_opt("channel", channel);
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::key_client;
    use crate::common::ChannelValue;
    use chrono::TimeZone;
    use chrono::Utc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_flow_data_default_timezone() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pvsystems/abc/flowdata"))
            .and(query_param("timezone", "zulu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "pvSystemId": "abc",
                "status": {"isOnline": true},
                "data": {
                    "logDateTime": "2024-05-01T12:30:05Z",
                    "channels": [{"channelName": "PowerPV", "unit": "W", "value": 812}]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let flow = key_client(&server).flow_data(None, None).await.unwrap();
        assert_eq!(flow.is_online(), Some(true));
        assert_eq!(
            flow.data
                .as_ref()
                .and_then(|d| d.channel("PowerPV"))
                .and_then(|c| c.value.as_ref())
                .and_then(ChannelValue::as_f64),
            Some(812.0)
        );
    }

    #[tokio::test]
    async fn test_flow_data_local_timezone() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pvsystems/abc/flowdata"))
            .and(query_param("timezone", "local"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let flow = key_client(&server)
            .flow_data(None, Some("local"))
            .await
            .unwrap();
        assert_eq!(flow.data, None);
    }

    #[tokio::test]
    async fn test_aggr_data_channels() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pvsystems/abc/aggrdata"))
            .and(query_param("period", "total"))
            .and(query_param("channel", "P,E"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "pvSystemId": "abc",
                "data": [{"logDateTime": "total", "channels": []}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let aggr = key_client(&server)
            .aggr_data(None, None, &["P", "E"])
            .await
            .unwrap();
        assert_eq!(aggr.data.map(|d| d.len()), Some(1));
    }

    #[tokio::test]
    async fn test_aggr_data_without_channels() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pvsystems/abc/aggrdata"))
            .and(query_param("period", "years"))
            .respond_with(move |req: &wiremock::Request| {
                if req.url.query_pairs().any(|(k, _)| k == "channel") {
                    ResponseTemplate::new(400)
                } else {
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({}))
                }
            })
            .expect(1)
            .mount(&server)
            .await;

        key_client(&server)
            .aggr_data(None, Some("years"), &[])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_hist_data_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pvsystems/abc/histdata"))
            .and(query_param("from", "2024-05-01T00:00:00Z"))
            .and(query_param("to", "2024-05-02T00:00:00Z"))
            .and(query_param("channel", "EnergyExported"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "pvSystemId": "abc",
                "data": [{"logDateTime": "2024-05-01T00:00:00Z", "logDuration": 300}],
                "links": {"totalItemsCount": 1},
                "totalDataCount": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let values = key_client(&server)
            .hist_data(None, from, to, Some("EnergyExported"))
            .await
            .unwrap();

        assert_eq!(values.total_data_count, 1);
        assert_eq!(values.entries()[0].log_duration, 300);
    }
}
