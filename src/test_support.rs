//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::api::{Resource, Transport, TransportError};

type Reply = Result<serde_json::Value, TransportError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// In-memory transport answering from a per-resource script.
///
/// Deferred replies let a test decide exactly when each request completes.
/// Requests with nothing scripted fail with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<Resource, VecDeque<Scripted>>>,
    requests: Mutex<Vec<(Resource, Vec<(&'static str, String)>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, resource: Resource, scripted: Scripted) {
        self.script
            .lock()
            .unwrap()
            .entry(resource)
            .or_default()
            .push_back(scripted);
    }

    /// Queues an immediate reply.
    pub fn reply(&self, resource: Resource, reply: Reply) -> &Self {
        self.push(resource, Scripted::Ready(reply));
        self
    }

    /// Queues a reply the test completes later through the returned sender.
    pub fn defer(&self, resource: Resource) -> oneshot::Sender<Reply> {
        let (sender, receiver) = oneshot::channel();
        self.push(resource, Scripted::Deferred(receiver));
        sender
    }

    /// Every request seen so far, in arrival order.
    pub fn requests(&self) -> Vec<(Resource, Vec<(&'static str, String)>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, resource: Resource) -> usize {
        self.requests()
            .iter()
            .filter(|(seen, _)| *seen == resource)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn get(
        &self,
        resource: Resource,
        query: &[(&'static str, String)],
    ) -> Result<serde_json::Value, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((resource, query.to_vec()));

        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(&resource)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("reply dropped".to_string()))),
            None => Err(TransportError::Network(format!(
                "nothing scripted for {}",
                resource.path()
            ))),
        }
    }
}

/// Sample payloads in the server's JSON shape.
pub mod fixtures {
    use serde_json::{Value, json};

    pub fn articles(title: &str) -> Value {
        json!([{
            "title": title,
            "description": "desc",
            "summary": "sum",
            "imageUrl": "https://img.example/a.png",
            "url": format!("https://news.example/{title}")
        }])
    }

    pub fn ad() -> Value {
        json!({"title": "Secure your stack"})
    }

    pub fn threat(score: f64, phrase: &str) -> Value {
        json!({"score": score, "phrase": phrase})
    }
}
