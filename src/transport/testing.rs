// Scripted HttpRequester for unit tests.
//
// Each (method, url) pair has a queue of replies. A reply is either ready
// immediately or gated behind a oneshot channel, so a test can decide the
// order in which concurrent requests complete.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;

use super::requester::{HttpRequest, HttpRequester, Method, RawResponse};
use crate::error::{Error, Result};

enum Reply {
    Ready(Result<RawResponse>),
    Gated(oneshot::Receiver<Result<RawResponse>>),
}

#[derive(Default)]
pub(crate) struct ScriptedRequester {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedRequester {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: Method, url: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn respond(&self, method: Method, url: &str, status: u16, body: &str) {
        self.push(method, url, Reply::Ready(Ok(RawResponse::new(status, body))));
    }

    pub(crate) fn fail(&self, method: Method, url: &str, message: &str) {
        let error = Error::transport(url, message.to_string());
        self.push(method, url, Reply::Ready(Err(error)));
    }

    /// The request for `url` will not complete until the returned sender fires.
    pub(crate) fn gate(&self, method: Method, url: &str) -> oneshot::Sender<Result<RawResponse>> {
        let (tx, rx) = oneshot::channel();
        self.push(method, url, Reply::Gated(rx));
        tx
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn requests_to(&self, url: &str) -> usize {
        self.sent.lock().unwrap().iter().filter(|r| r.url == url).count()
    }
}

#[async_trait]
impl HttpRequester for ScriptedRequester {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse> {
        let key = (request.method, request.url.clone());
        self.sent.lock().unwrap().push(request);

        let reply = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => match rx.await {
                Ok(result) => result,
                Err(_) => Err(Error::transport(&key.1, "gate dropped")),
            },
            None => Err(Error::transport(&key.1, "no scripted response")),
        }
    }
}
