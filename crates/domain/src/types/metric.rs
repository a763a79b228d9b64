//! Usage metric events.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::GlideError;

/// One usage event sent to the metrics endpoint.
///
/// Serializes to `{sessionId, metricName, timestamp, api, clientId,
/// operator}` with an RFC 3339 timestamp at second precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEvent {
    pub session_id: String,
    pub metric_name: String,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub api: String,
    pub client_id: String,
    #[serde(default)]
    pub operator: String,
}

impl MetricEvent {
    /// Event stamped with the current time.
    pub fn now(
        session_id: impl Into<String>,
        metric_name: impl Into<String>,
        api: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            metric_name: metric_name.into(),
            timestamp: Utc::now(),
            api: api.into(),
            client_id: client_id.into(),
            operator: String::new(),
        }
    }

    #[must_use]
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }
}

fn serialize_rfc3339<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Caller-built metric submitted through the client facade.
///
/// Missing fields are checked by [`MetricReport::into_event`] rather than by
/// the type system so partial reports produce a descriptive error.
#[derive(Debug, Clone, Default)]
pub struct MetricReport {
    pub session_id: String,
    pub metric_name: String,
    pub api: String,
    pub timestamp: Option<DateTime<Utc>>,
    /// Falls back to the configured client id when empty.
    pub client_id: String,
    pub operator: String,
}

impl MetricReport {
    /// Validate the report and turn it into an event.
    ///
    /// # Errors
    /// Returns `GlideError::InvalidMetric` naming the first missing field.
    pub fn into_event(self, default_client_id: &str) -> Result<MetricEvent, GlideError> {
        let client_id =
            if self.client_id.is_empty() { default_client_id.to_string() } else { self.client_id };

        if client_id.is_empty() {
            return Err(GlideError::InvalidMetric("missing clientId".into()));
        }
        if self.session_id.is_empty() {
            return Err(GlideError::InvalidMetric("missing sessionId".into()));
        }
        if self.metric_name.is_empty() {
            return Err(GlideError::InvalidMetric("missing metricName".into()));
        }
        if self.api.is_empty() {
            return Err(GlideError::InvalidMetric("missing api".into()));
        }
        let timestamp =
            self.timestamp.ok_or_else(|| GlideError::InvalidMetric("missing timestamp".into()))?;

        Ok(MetricEvent {
            session_id: self.session_id,
            metric_name: self.metric_name,
            timestamp,
            api: self.api,
            client_id,
            operator: self.operator,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn report() -> MetricReport {
        MetricReport {
            session_id: "sess".into(),
            metric_name: "Glide start".into(),
            api: "magic-auth".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).single(),
            ..MetricReport::default()
        }
    }

    #[test]
    fn event_serializes_wire_shape() {
        let event = report().into_event("client-1").unwrap().with_operator("op");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "sessionId": "sess",
                "metricName": "Glide start",
                "timestamp": "2024-05-01T12:30:00Z",
                "api": "magic-auth",
                "clientId": "client-1",
                "operator": "op",
            })
        );
    }

    #[test]
    fn client_id_defaults_then_is_required() {
        let event = report().into_event("fallback").unwrap();
        assert_eq!(event.client_id, "fallback");

        let explicit = MetricReport { client_id: "mine".into(), ..report() };
        assert_eq!(explicit.into_event("fallback").unwrap().client_id, "mine");

        let err = report().into_event("").unwrap_err();
        assert!(err.to_string().contains("missing clientId"));
    }

    #[test]
    fn required_fields_are_checked() {
        let missing_session = MetricReport { session_id: String::new(), ..report() };
        assert!(missing_session.into_event("c").unwrap_err().to_string().contains("sessionId"));

        let missing_name = MetricReport { metric_name: String::new(), ..report() };
        assert!(missing_name.into_event("c").unwrap_err().to_string().contains("metricName"));

        let missing_api = MetricReport { api: String::new(), ..report() };
        assert!(missing_api.into_event("c").unwrap_err().to_string().contains("api"));

        let missing_ts = MetricReport { timestamp: None, ..report() };
        assert!(missing_ts.into_event("c").unwrap_err().to_string().contains("timestamp"));
    }
}
