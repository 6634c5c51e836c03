//! In-memory transport and log capture for unit tests.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use payload_rpc_core::{Request, Response, Result, Transport};

use crate::{ClientOptions, Error};

enum Reply {
    Respond {
        status: u16,
        content_type: String,
        body: Bytes,
    },
    Fail(String),
}

/// Records every request and answers each with the same canned reply.
#[derive(Clone)]
pub(crate) struct RecordingTransport {
    reply: Arc<Reply>,
    requests: Arc<Mutex<Vec<Request<Bytes>>>>,
}

impl RecordingTransport {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply: Arc::new(reply),
            requests: Arc::default(),
        }
    }

    pub(crate) fn json(status: u16, body: serde_json::Value) -> Self {
        Self::raw(status, "application/json", &body.to_string())
    }

    pub(crate) fn raw(status: u16, content_type: &str, body: &str) -> Self {
        Self::with_reply(Reply::Respond {
            status,
            content_type: content_type.to_string(),
            body: Bytes::from(body.to_string()),
        })
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::with_reply(Reply::Fail(message.to_string()))
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().expect("lock").len()
    }

    pub(crate) fn last_request(&self) -> Request<Bytes> {
        self.requests
            .lock()
            .expect("lock")
            .last()
            .cloned()
            .expect("a request was sent")
    }

    pub(crate) fn last_url(&self) -> String {
        self.last_request().url().to_string()
    }

    pub(crate) fn last_body(&self) -> Option<serde_json::Value> {
        self.last_request()
            .body()
            .map(|body| serde_json::from_slice(body).expect("JSON body"))
    }
}

impl Transport for RecordingTransport {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.requests.lock().expect("lock").push(request);

        let result = match self.reply.as_ref() {
            Reply::Respond {
                status,
                content_type,
                body,
            } => {
                let headers = HashMap::from([("content-type".to_string(), content_type.clone())]);
                Ok(Response::new(*status, headers, body.clone()))
            }
            Reply::Fail(message) => Err(Error::transport(message.clone())),
        };
        std::future::ready(result)
    }
}

/// Options for `http://localhost:3000/api` with `users` authenticatable.
pub(crate) fn options() -> ClientOptions {
    ClientOptions::builder("http://localhost:3000/api")
        .auth_collection("users")
        .build()
        .expect("valid options")
}

/// Collects the JSON events emitted while its subscriber is the default.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Install a JSON subscriber for the current thread until the guard drops.
    ///
    /// `#[tokio::test]` runs on a current-thread runtime, so every event of
    /// the test body reaches it.
    pub(crate) fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Captured events with the given target.
    pub(crate) fn events(&self, target: &str) -> Vec<serde_json::Value> {
        let buffer = self.buffer.lock().expect("lock");
        String::from_utf8_lossy(&buffer)
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).expect("JSON event"))
            .filter(|event| event["target"] == target)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
