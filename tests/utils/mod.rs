use flipt::{ClientError, Transport, TransportRequest, TransportResponse};
use log::kv::Key;
use log::{set_max_level, Level, Log, Metadata, Record};
use rand::distr::{Alphanumeric, SampleString};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const BOOLEAN_PATH: &str = "/evaluate/v1/boolean";
pub const VARIANT_PATH: &str = "/evaluate/v1/variant";

pub fn rand_token() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 32)
}

pub fn boolean_payload() -> serde_json::Value {
    serde_json::json!({
        "enabled": true,
        "reason": "MATCH_EVALUATION_REASON",
        "requestDurationMillis": 0.39315,
        "requestId": "abc-123",
        "timestamp": "2023-10-31T00:57:47.263242143Z"
    })
}

pub fn variant_payload() -> serde_json::Value {
    serde_json::json!({
        "match": true,
        "reason": "MATCH_EVALUATION_REASON",
        "requestDurationMillis": 0.1,
        "requestId": "r1",
        "timestamp": "t1",
        "segmentKeys": ["foo", "bar"],
        "variantKey": "A",
        "variantAttachment": ""
    })
}

#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    history: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub fn queue_json(&self, body: serde_json::Value) {
        self.responses.lock().unwrap().push_back(TransportResponse {
            status: 200,
            body: body.to_string(),
        });
    }

    pub fn history(&self) -> Vec<TransportRequest> {
        self.history.lock().unwrap().clone()
    }

    pub fn payload(&self, index: usize) -> serde_json::Value {
        serde_json::from_str(&self.history.lock().unwrap()[index].body).unwrap()
    }

    pub fn last_payload(&self) -> serde_json::Value {
        let len = self.history.lock().unwrap().len();
        self.payload(len - 1)
    }
}

impl Transport for RecordingTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, ClientError> {
        self.history.lock().unwrap().push(request);
        Ok(self.responses.lock().unwrap().pop_front().unwrap())
    }
}

pub struct RecordingLogger {}

impl RecordingLogger {
    thread_local!(pub static LOGS: RefCell<String> = RefCell::new(String::default()));
}

impl Log for RecordingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().contains("flipt")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        let event_id = record
            .key_values()
            .get(Key::from("event_id"))
            .and_then(|id| id.to_i64())
            .unwrap_or_default();
        Self::LOGS.with_borrow_mut(|l| l.push_str(format!("{level} [{event_id}] {}\n", record.args()).as_str()));
    }

    fn flush(&self) {}
}

pub fn log_record_init() {
    set_max_level(log::LevelFilter::Debug);
    _ = log::set_logger(&RecordingLogger {});
}
