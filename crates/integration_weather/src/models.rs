//! KMA response models
//!
//! Wire types for the `VilageFcstInfoService_2.0` JSON envelope. Decoding runs
//! in two phases: the header is read first so a provider error is reported
//! with its own message even when the body is empty or shaped differently,
//! and only a successful envelope has its body decoded into records.

use domain::{Endpoint, ForecastRecord};
use quick_xml::{Reader, events::Event};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::client::WeatherError;

/// Result code of a successful envelope
pub const SUCCESS_CODE: &str = "00";

#[derive(Debug, Deserialize)]
struct Envelope {
    response: ResponseEnvelope,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    header: ResponseHeader,
    #[serde(default)]
    body: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseHeader {
    result_code: String,
    #[serde(default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseBody<T> {
    items: ItemList<T>,
    #[serde(default)]
    total_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ItemList<T> {
    item: Vec<T>,
}

/// One `getUltraSrtNcst` item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationItem {
    pub category: String,
    #[serde(deserialize_with = "string_or_number")]
    pub obsr_value: String,
}

/// One `getVilageFcst` item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastItem {
    #[serde(deserialize_with = "string_or_number")]
    pub fcst_date: String,
    #[serde(deserialize_with = "string_or_number")]
    pub fcst_time: String,
    pub category: String,
    #[serde(deserialize_with = "string_or_number")]
    pub fcst_value: String,
}

impl From<ForecastItem> for ForecastRecord {
    fn from(item: ForecastItem) -> Self {
        Self::new(item.fcst_date, item.fcst_time, item.category, item.fcst_value)
    }
}

/// Decoded record list of one response
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: Option<u32>,
}

/// The provider encodes values as JSON strings, but numbers show up too
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Decode a raw response body into its record list
pub fn decode_page<T: DeserializeOwned>(
    endpoint: Endpoint,
    raw: &str,
) -> Result<Page<T>, WeatherError> {
    if let Some(err) = gateway_error(raw) {
        return Err(err);
    }

    let envelope: Envelope = serde_json::from_str(raw)
        .map_err(|e| WeatherError::malformed(endpoint, format!("invalid envelope: {e}")))?;
    let ResponseEnvelope { header, body } = envelope.response;

    if header.result_code != SUCCESS_CODE {
        return Err(WeatherError::Provider {
            code: header.result_code,
            message: header.result_msg,
        });
    }

    let body = body.ok_or_else(|| WeatherError::malformed(endpoint, "response has no body"))?;
    let body: ResponseBody<T> = serde_json::from_value(body)
        .map_err(|e| WeatherError::malformed(endpoint, format!("unexpected record list: {e}")))?;

    if body.items.item.is_empty() {
        return Err(WeatherError::malformed(endpoint, "record list is empty"));
    }

    Ok(Page {
        items: body.items.item,
        total_count: body.total_count,
    })
}

/// The data.go.kr gateway rejects requests (bad service key, quota) with an
/// XML document instead of the JSON envelope.
fn gateway_error(raw: &str) -> Option<WeatherError> {
    if !raw.trim_start().starts_with('<') {
        return None;
    }

    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current: Option<String> = None;
    let mut auth_msg: Option<String> = None;
    let mut err_msg: Option<String> = None;
    let mut reason_code: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            },
            Ok(Event::Text(e)) => {
                let slot = match current.as_deref() {
                    Some("returnAuthMsg") => Some(&mut auth_msg),
                    Some("errMsg") => Some(&mut err_msg),
                    Some("returnReasonCode") => Some(&mut reason_code),
                    _ => None,
                };
                if let (Some(slot), Ok(text)) = (slot, e.unescape()) {
                    *slot = Some(text.into_owned());
                }
            },
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!(error = ?e, "XML parsing error in gateway response");
                break;
            },
            _ => {},
        }
        buf.clear();
    }

    let message = auth_msg.or(err_msg)?;
    Some(WeatherError::Provider {
        code: reason_code.unwrap_or_default(),
        message,
    })
}
