//! Transport Shim
//!
//! Delivers callbacks to the host as `POST <base>/<endpoint>` with a JSON
//! body. Posting is fire-and-forget: nothing waits for or reads a response,
//! and a failed post is logged and dropped.
//!
//! Implementations:
//! - [`HttpTransport`]: bounded queue drained by a worker thread using `ureq`
//! - [`StdoutTransport`]: writes each post as a JSONL line (dry runs)
//! - [`RecordingTransport`]: keeps posts in memory (tests, embedders)

use std::io::Write;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{NuiError, Result};
use crate::logging;
use crate::protocol::Callback;

pub trait Transport {
    /// Queue `callback` for delivery. Never blocks on the host.
    fn post(&self, callback: &Callback);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, callback: &Callback) {
        (**self).post(callback)
    }
}

/// One outbound request, resolved to its URL
#[derive(Debug)]
struct PostRequest {
    url: String,
    endpoint: &'static str,
    body: Option<Value>,
}

/// HTTP transport backed by a bounded queue and a single worker thread.
///
/// Dropping it closes the queue; posts already queued are still delivered
/// before the worker exits.
pub struct HttpTransport {
    config: Config,
    tx: async_channel::Sender<PostRequest>,
    worker: Option<JoinHandle<()>>,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let (tx, rx) = async_channel::bounded::<PostRequest>(config.post_queue_capacity.max(1));

        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(config.post_timeout_ms)))
            .build();
        let agent: ureq::Agent = agent_config.into();

        let worker = std::thread::Builder::new()
            .name("nui-post".to_string())
            .spawn(move || {
                debug!("Post worker started");
                while let Ok(request) = rx.recv_blocking() {
                    send(&agent, request);
                }
                debug!("Post worker exiting");
            })
            .map_err(|e| NuiError::Transport(format!("failed to spawn post worker: {}", e)))?;

        info!(base_url = %config.callback_base_url(), "HTTP transport ready");

        Ok(HttpTransport {
            config: config.clone(),
            tx,
            worker: Some(worker),
        })
    }

    /// Where a callback for `endpoint` is posted
    pub fn url_for(&self, endpoint: &str) -> String {
        self.config.callback_url(endpoint)
    }
}

fn send(agent: &ureq::Agent, request: PostRequest) {
    let outcome = match &request.body {
        Some(body) => agent.post(&request.url).send_json(body),
        None => agent.post(&request.url).send_empty(),
    };
    match outcome {
        Ok(response) => debug!(
            endpoint = request.endpoint,
            status = response.status().as_u16(),
            "Callback delivered"
        ),
        Err(e) => warn!(
            endpoint = request.endpoint,
            url = %request.url,
            error = %e,
            "Callback post failed, dropping"
        ),
    }
}

impl Transport for HttpTransport {
    fn post(&self, callback: &Callback) {
        let endpoint = callback.endpoint();
        let body = callback.body();
        logging::log_callback(endpoint, body.as_ref());

        let request = PostRequest {
            url: self.url_for(endpoint),
            endpoint,
            body,
        };
        if let Err(e) = self.tx.try_send(request) {
            if e.is_full() {
                warn!(endpoint, "Post queue full, dropping callback");
            } else {
                error!(endpoint, "Post worker gone, dropping callback");
            }
        }
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        self.tx.close();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Post worker panicked");
            }
        }
    }
}

/// Writes `{"type":"post","endpoint":..,"url":..,"body":..}` lines to stdout
pub struct StdoutTransport {
    config: Config,
}

impl StdoutTransport {
    pub fn new(config: &Config) -> Self {
        StdoutTransport {
            config: config.clone(),
        }
    }
}

impl Transport for StdoutTransport {
    fn post(&self, callback: &Callback) {
        let endpoint = callback.endpoint();
        let body = callback.body();
        logging::log_callback(endpoint, body.as_ref());

        let line = json!({
            "type": "post",
            "endpoint": endpoint,
            "url": self.config.callback_url(endpoint),
            "body": body,
        });
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
            warn!(endpoint, error = %e, "Failed to write post to stdout");
        }
    }
}

/// Keeps every posted callback; clones share the same log
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    posts: Arc<Mutex<Vec<Callback>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> Vec<Callback> {
        self.posts.lock().clone()
    }

    /// Remove and return everything posted so far
    pub fn take(&self) -> Vec<Callback> {
        std::mem::take(&mut *self.posts.lock())
    }

    pub fn len(&self) -> usize {
        self.posts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.lock().is_empty()
    }
}

impl Transport for RecordingTransport {
    fn post(&self, callback: &Callback) {
        logging::log_callback(callback.endpoint(), callback.body().as_ref());
        self.posts.lock().push(callback.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_clones_share_posts() {
        let transport = RecordingTransport::new();
        let handle = transport.clone();
        transport.post(&Callback::ClickedButton { id: 1 });
        transport.post(&Callback::CloseMenu);

        assert_eq!(handle.len(), 2);
        assert_eq!(
            handle.take(),
            vec![Callback::ClickedButton { id: 1 }, Callback::CloseMenu]
        );
        assert!(transport.is_empty());
    }

    #[test]
    fn boxed_transport_forwards() {
        let recorder = RecordingTransport::new();
        let boxed: Box<dyn Transport> = Box::new(recorder.clone());
        boxed.post(&Callback::CloseMenu);
        assert_eq!(recorder.posts(), vec![Callback::CloseMenu]);
    }

    #[test]
    fn http_transport_uses_configured_base() {
        let config = Config {
            callback_base: Some("http://127.0.0.1:9/".to_string()),
            ..Config::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.url_for("closeMenu"), "http://127.0.0.1:9/closeMenu");
    }
}
