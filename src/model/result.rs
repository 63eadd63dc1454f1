use crate::errors::{ClientError, ErrorKind};
use crate::model::enums::EvaluationReason;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON parsing failed. ({0})")]
    Parse(String),
    #[error("The response body is not a JSON object.")]
    NotAnObject,
    #[error("Building the evaluation result failed. ({0})")]
    Field(String),
}

impl From<Error> for ClientError {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::Parse(_) | Error::NotAnObject => ErrorKind::InvalidHttpResponseContent,
            Error::Field(_) => ErrorKind::InvalidResponseField,
        };
        ClientError::new(kind, format!("Evaluation response content was invalid. {err}"))
    }
}

/// Parses the whole body into a JSON object first, then reads the typed fields from it.
pub fn result_from_json<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let value = serde_json::from_str::<serde_json::Value>(body)
        .map_err(|err| Error::Parse(err.to_string()))?;
    if !value.is_object() {
        return Err(Error::NotAnObject);
    }
    serde_json::from_value::<T>(value).map_err(|err| Error::Field(err.to_string()))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

/// Result of a boolean flag evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanEvaluationResult {
    enabled: bool,
    reason: String,
    request_duration_millis: f64,
    request_id: String,
    timestamp: String,
}

impl BooleanEvaluationResult {
    /// Whether the flag is enabled for the evaluated entity.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The reason reported by the service, e.g. `MATCH_EVALUATION_REASON`.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The reported reason as an [`EvaluationReason`].
    pub fn reason_kind(&self) -> EvaluationReason {
        EvaluationReason::parse(&self.reason)
    }

    /// Time the service spent on the evaluation, in milliseconds.
    pub fn request_duration_millis(&self) -> f64 {
        self.request_duration_millis
    }

    /// Identifier of the evaluation request assigned by the service.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The ISO-8601 timestamp of the evaluation, as returned by the service.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The timestamp of the evaluation. Returns [`None`] when it's not a valid RFC 3339 timestamp.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Result of a variant flag evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantEvaluationResult {
    #[serde(rename = "match")]
    matched: bool,
    reason: String,
    request_duration_millis: f64,
    request_id: String,
    timestamp: String,
    segment_keys: Vec<String>,
    variant_key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    variant_attachment: String,
}

impl VariantEvaluationResult {
    /// Whether a rule of the flag matched the evaluation context.
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// The reason reported by the service, e.g. `MATCH_EVALUATION_REASON`.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The reported reason as an [`EvaluationReason`].
    pub fn reason_kind(&self) -> EvaluationReason {
        EvaluationReason::parse(&self.reason)
    }

    /// Time the service spent on the evaluation, in milliseconds.
    pub fn request_duration_millis(&self) -> f64 {
        self.request_duration_millis
    }

    /// Identifier of the evaluation request assigned by the service.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The ISO-8601 timestamp of the evaluation, as returned by the service.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The timestamp of the evaluation. Returns [`None`] when it's not a valid RFC 3339 timestamp.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Keys of the segments that matched, in the order the service returned them.
    pub fn segment_keys(&self) -> &[String] {
        &self.segment_keys
    }

    /// Key of the served variant.
    pub fn variant_key(&self) -> &str {
        &self.variant_key
    }

    /// The attachment of the served variant, exactly as the service returned it.
    /// Empty when the variant carries no attachment.
    pub fn variant_attachment(&self) -> &str {
        &self.variant_attachment
    }

    /// Decodes the variant attachment as JSON.
    ///
    /// Returns `Ok(None)` when the variant carries no attachment.
    ///
    /// # Errors
    ///
    /// This method fails when the attachment is not valid JSON.
    pub fn attachment_json(&self) -> Result<Option<serde_json::Value>, ClientError> {
        if self.variant_attachment.is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&self.variant_attachment) {
            Ok(value) => Ok(Some(value)),
            Err(err) => Err(ClientError::new(
                ErrorKind::InvalidVariantAttachment,
                format!("Failed to decode the attachment of variant '{}'. ({err})", self.variant_key),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{result_from_json, BooleanEvaluationResult, Error, VariantEvaluationResult};
    use crate::errors::{ClientError, ErrorKind};
    use crate::EvaluationReason;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    const BOOL_BODY: &str = r#"{
        "enabled": true,
        "reason": "MATCH_EVALUATION_REASON",
        "requestDurationMillis": 0.39315,
        "requestId": "621e48e2-9127-4309-b786-3bfa5885f4bc",
        "timestamp": "2023-10-31T00:57:47.263242143Z",
        "flagKey": "flag"
    }"#;

    fn variant_body() -> serde_json::Value {
        json!({
            "match": true,
            "reason": "MATCH_EVALUATION_REASON",
            "requestDurationMillis": 0.1,
            "requestId": "r1",
            "timestamp": "t1",
            "segmentKeys": ["foo", "bar"],
            "variantKey": "A",
            "variantAttachment": "{\"data\":\"attachment\"}"
        })
    }

    #[test]
    fn parse_boolean() {
        let result = result_from_json::<BooleanEvaluationResult>(BOOL_BODY).unwrap();

        assert!(result.enabled());
        assert_eq!(result.reason(), "MATCH_EVALUATION_REASON");
        assert_eq!(result.reason_kind(), EvaluationReason::Match);
        assert_eq!(result.request_duration_millis(), 0.39315);
        assert_eq!(result.request_id(), "621e48e2-9127-4309-b786-3bfa5885f4bc");
        assert_eq!(result.timestamp(), "2023-10-31T00:57:47.263242143Z");

        let time = result.timestamp_utc().unwrap();
        assert_eq!(time.year(), 2023);
        assert_eq!(time.second(), 47);
        assert_eq!(time.nanosecond(), 263242143);
    }

    #[test]
    fn parse_integer_duration() {
        let body = r#"{"enabled": false, "reason": "DEFAULT_EVALUATION_REASON", "requestDurationMillis": 123456, "requestId": "id", "timestamp": "x"}"#;
        let result = result_from_json::<BooleanEvaluationResult>(body).unwrap();

        assert!(!result.enabled());
        assert_eq!(result.request_duration_millis(), 123456.0);
        assert!(result.timestamp_utc().is_none());
    }

    #[test]
    fn parse_variant() {
        let result = result_from_json::<VariantEvaluationResult>(&variant_body().to_string()).unwrap();

        assert!(result.is_match());
        assert_eq!(result.variant_key(), "A");
        assert_eq!(result.segment_keys(), ["foo", "bar"]);
        assert_eq!(result.variant_attachment(), r#"{"data":"attachment"}"#);
        assert_eq!(
            result.attachment_json().unwrap(),
            Some(json!({"data": "attachment"}))
        );
    }

    #[test]
    fn variant_attachment_missing_or_null() {
        let mut body = variant_body();
        body.as_object_mut().unwrap().remove("variantAttachment");
        let result = result_from_json::<VariantEvaluationResult>(&body.to_string()).unwrap();
        assert_eq!(result.variant_attachment(), "");
        assert_eq!(result.attachment_json().unwrap(), None);

        body["variantAttachment"] = serde_json::Value::Null;
        let result = result_from_json::<VariantEvaluationResult>(&body.to_string()).unwrap();
        assert_eq!(result.variant_attachment(), "");
    }

    #[test]
    fn variant_attachment_kept_raw() {
        let mut body = variant_body();
        body["variantAttachment"] = json!("{'data':'attachment'}");
        let result = result_from_json::<VariantEvaluationResult>(&body.to_string()).unwrap();

        assert_eq!(result.variant_attachment(), "{'data':'attachment'}");
        let err = result.attachment_json().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidVariantAttachment);
    }

    #[test]
    fn missing_required_field() {
        let mut body = variant_body();
        body.as_object_mut().unwrap().remove("segmentKeys");
        let err = result_from_json::<VariantEvaluationResult>(&body.to_string()).unwrap_err();

        assert!(matches!(err, Error::Field(_)));
        assert!(err.to_string().contains("segmentKeys"));

        let err: ClientError = result_from_json::<BooleanEvaluationResult>("{}").unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::InvalidResponseField);
        assert!(err.message.contains("enabled"));
    }

    #[test]
    fn wrong_field_type() {
        let body = BOOL_BODY.replace("true", "\"true\"");
        let err: ClientError = result_from_json::<BooleanEvaluationResult>(&body).unwrap_err().into();

        assert_eq!(err.kind, ErrorKind::InvalidResponseField);
    }

    #[test]
    fn invalid_body() {
        let err = result_from_json::<BooleanEvaluationResult>(r#"{"enabled": "#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        let err: ClientError = err.into();
        assert_eq!(err.kind, ErrorKind::InvalidHttpResponseContent);

        let err = result_from_json::<BooleanEvaluationResult>("[]").unwrap_err();
        assert!(matches!(err, Error::NotAnObject));

        let err: ClientError = result_from_json::<BooleanEvaluationResult>("").unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::InvalidHttpResponseContent);
    }
}
