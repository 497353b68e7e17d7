mod event_loop_tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use whatsplan_client::{SearchBackend, SearchError};
use whatsplan_config::Config;
use whatsplan_core::preferences::FilePreferences;
use whatsplan_types::{AppEvent, EventRecord, Query, QueryStatus, SearchResponse};

use crate::events::event_loop;
use crate::state::AppState;

/// Backend that replies after an optional delay and records queries
pub struct ScriptedBackend {
    pub queries: std::sync::Mutex<Vec<String>>,
    pub calls: AtomicUsize,
    delay: Duration,
    reply: fn() -> Result<SearchResponse, SearchError>,
}

impl ScriptedBackend {
    pub fn new(delay: Duration, reply: fn() -> Result<SearchResponse, SearchError>) -> Arc<Self> {
        Arc::new(Self {
            queries: std::sync::Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay,
            reply,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search(&self, query: &Query) -> Result<SearchResponse, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .lock()
            .unwrap()
            .push(query.as_str().to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.reply)()
    }

    fn endpoint(&self) -> &str {
        "scripted://search"
    }
}

pub fn two_events() -> Result<SearchResponse, SearchError> {
    Ok(SearchResponse {
        status: "success".into(),
        query_status: Some(QueryStatus::Valid),
        events: vec![
            EventRecord {
                score: Some(0.85),
                ..EventRecord::titled("Jazz Night")
            },
            EventRecord::titled("Blues Jam"),
        ],
        elapsed_time: Some(1.5),
        search_id: Some(serde_json::json!("abc")),
        ..Default::default()
    })
}

/// Running event loop wired to test channels
pub struct Harness {
    pub ui_tx: AsyncSender<AppEvent>,
    pub ui_rx: AsyncReceiver<AppEvent>,
    pub state: Arc<AppState>,
    pub _dir: tempfile::TempDir,
}

impl Harness {
    pub fn start(backend: Arc<dyn SearchBackend>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::from_lookup(|_| None);
        config.preferences.path = dir.path().join("prefs.json");
        config.ui.chips = vec!["Jazz in Chicago".into(), "Comedy in Austin".into()];

        let prefs = FilePreferences::load(&config.preferences.path).unwrap();
        let state = Arc::new(AppState::new(config, prefs, false));

        let (ui_tx, ui_to_app_rx) = kanal::unbounded_async();
        let (app_to_ui_tx, ui_rx) = kanal::unbounded_async();

        tokio::spawn(event_loop(
            state.clone(),
            backend,
            ui_to_app_rx,
            ui_tx.clone(),
            app_to_ui_tx,
        ));

        Self {
            ui_tx,
            ui_rx,
            state,
            _dir: dir,
        }
    }

    pub async fn send(&self, event: AppEvent) {
        self.ui_tx.send(event).await.expect("send failed");
    }

    pub async fn next(&self) -> AppEvent {
        match tokio::time::timeout(Duration::from_secs(2), self.ui_rx.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout - event never arrived!"),
        }
    }
}
