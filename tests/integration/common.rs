use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing_subscriber::fmt::MakeWriter;
use vectara_ingest::crawler::{Crawler, CrawlerContext, CrawlerRegistry};
use vectara_ingest::EnvSettings;
use wiremock::{Request, Respond, ResponseTemplate};

pub const CLIENT_ID: &str = "app-client";
pub const CLIENT_SECRET: &str = "s3cret";
/// base64("app-client:s3cret")
pub const BASIC_AUTH: &str = "Basic YXBwLWNsaWVudDpzM2NyZXQ=";

/// Writes a config document to a temporary file
pub fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// The standard run environment, pointing at `file`
pub fn full_env(file: &NamedTempFile) -> Vec<(&'static str, String)> {
    vec![
        ("CONFIG_FILE", file.path().to_str().unwrap().to_string()),
        ("PROFILE", "p".to_string()),
        ("VECTARA_API_KEY", "k".to_string()),
        ("VECTARA_CUSTOMER_ID", "1000".to_string()),
        ("VECTARA_CORPUS_ID", "7".to_string()),
    ]
}

pub fn env_settings(pairs: &[(&'static str, String)]) -> EnvSettings {
    EnvSettings::from_pairs(pairs.iter().map(|(name, value)| (*name, value.as_str())))
}

/// Shared record of what the recording crawler saw
#[derive(Default)]
pub struct Recorder {
    pub constructed: Mutex<Vec<CrawlerContext>>,
    pub crawls: AtomicUsize,
    /// Value of `resets` at the moment `crawl()` started
    pub resets_before_crawl: Mutex<Option<usize>>,
    pub resets: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn constructions(&self) -> usize {
        self.constructed.lock().unwrap().len()
    }

    pub fn crawl_count(&self) -> usize {
        self.crawls.load(Ordering::SeqCst)
    }
}

struct RecordingCrawler {
    recorder: Arc<Recorder>,
}

#[async_trait]
impl Crawler for RecordingCrawler {
    async fn crawl(&mut self) -> anyhow::Result<()> {
        let resets = self.recorder.resets.load(Ordering::SeqCst);
        *self.recorder.resets_before_crawl.lock().unwrap() = Some(resets);
        self.recorder.crawls.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Recording crawler running");
        Ok(())
    }
}

/// A registry with a recording crawler registered as `crawler_type`
pub fn recording_registry(crawler_type: &str, recorder: &Arc<Recorder>) -> CrawlerRegistry {
    let recorder = Arc::clone(recorder);
    let mut registry = CrawlerRegistry::default();
    registry.register_crawler(crawler_type, move |ctx| {
        recorder.constructed.lock().unwrap().push(ctx);
        Ok(Box::new(RecordingCrawler {
            recorder: Arc::clone(&recorder),
        }) as Box<dyn Crawler>)
    });
    registry
}

/// Responds to reset requests and counts them
pub struct CountingResponder {
    pub status: u16,
    pub count: Arc<AtomicUsize>,
}

impl Respond for CountingResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.count.fetch_add(1, Ordering::SeqCst);
        ResponseTemplate::new(self.status).set_body_string("{}")
    }
}

/// In-memory log sink for a `tracing_subscriber::fmt` subscriber
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
