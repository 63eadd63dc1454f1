use flipt::*;
use log::kv::Key;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Debug level logging shows every evaluation request the client sends.
    log::set_max_level(LevelFilter::Debug);
    log::set_logger(&PrintLog {}).unwrap();

    let client = Client::builder("#API-TOKEN#", "default")
        .base_url("http://localhost:8080")
        .default_context(Context::from([("region", "eu")]))
        .http_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    match client.evaluate_boolean("isAwesomeFeatureEnabled", None, Some("#SOME-USER-ID#")).await {
        Ok(result) => println!("isAwesomeFeatureEnabled: {} ({})", result.enabled(), result.reason()),
        Err(err) => println!("isAwesomeFeatureEnabled failed: {err}"),
    }

    let premium = client.with_context(Context::new().with("plan", "premium"));

    match premium.evaluate_variant("colorScheme", None, Some("#SOME-USER-ID#")).await {
        Ok(result) => println!(
            "colorScheme: {} (attachment: {})",
            result.variant_key(),
            result.variant_attachment()
        ),
        Err(err) => println!("colorScheme failed: {err}"),
    }
}

// Example log implementation.
pub struct PrintLog {}

impl Log for PrintLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().contains("flipt")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        match record.key_values().get(Key::from("event_id")) {
            Some(event_id) => println!("{level} [{event_id}] {}", record.args()),
            None => println!("{level} {}", record.args()),
        }
    }

    fn flush(&self) {}
}
