//! Shared test doubles for the transport seam.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::{ProfileTransport, TransportResponse};
use crate::errors::ProfilesError;

type Reply = Result<TransportResponse, ProfilesError>;

/// Transport that plays back a fixed script of replies.
///
/// Once the script is exhausted, every further call gets the fallback reply.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: Err(ProfilesError::Transport("script exhausted".to_string())),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with the same reply.
    pub fn always(reply: Reply) -> Self {
        let mut transport = Self::new(Vec::new());
        transport.fallback = reply;
        transport
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Paths and query pairs received so far.
    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileTransport for ScriptedTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((
            path.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));

        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

/// A well-formed upstream user record.
pub(crate) fn raw_profile(id: u64) -> Value {
    json!({
        "id": id,
        "firstName": "Emily",
        "lastName": "Johnson",
        "age": 28,
        "email": format!("user{}@x.dummyjson.com", id),
        "phone": "+81 965-431-3024",
        "username": format!("user{}", id),
        "birthDate": "1996-5-30",
        "image": format!("https://dummyjson.com/icon/user{}/128", id),
        "address": {
            "address": "626 Main Street",
            "city": "Phoenix",
            "state": "Mississippi",
            "country": "United States"
        },
        "company": {
            "name": "Dooley, Kozey and Cronin",
            "title": "Sales Manager"
        }
    })
}

/// A record that fails validation on its email.
pub(crate) fn malformed_profile(id: u64) -> Value {
    let mut raw = raw_profile(id);
    raw["email"] = json!("not-an-email");
    raw
}

/// `200 OK` with the records wrapped in the `users` container.
pub(crate) fn users_reply(records: Vec<Value>) -> Reply {
    Ok(TransportResponse::ok(
        json!({ "users": records, "total": 208 }).to_string(),
    ))
}

pub(crate) fn status_reply(status: u16) -> Reply {
    Ok(TransportResponse::new(status, ""))
}
