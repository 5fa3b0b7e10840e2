//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use profiledeck_profiles::{
    ProfileClient, ProfileFeed, ProfileTransport, ProfilesError, RetryConfig, TransportResponse,
};
use serde_json::{json, Value};

/// Transport replaying canned replies, then repeating the last one.
pub struct CannedTransport {
    replies: Mutex<VecDeque<Result<TransportResponse, ProfilesError>>>,
    last: Mutex<Option<Result<TransportResponse, ProfilesError>>>,
    calls: AtomicUsize,
}

impl CannedTransport {
    pub fn new(replies: Vec<Result<TransportResponse, ProfilesError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileTransport for CannedTransport {
    async fn get(
        &self,
        _path: &str,
        _query: &[(&str, String)],
    ) -> Result<TransportResponse, ProfilesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut last = self.last.lock().unwrap();
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            *last = Some(reply);
        }
        last.clone()
            .unwrap_or_else(|| Err(ProfilesError::Transport("no reply".to_string())))
    }
}

pub fn feed(transport: Arc<CannedTransport>, max_retries: u32) -> ProfileFeed {
    ProfileFeed::new(
        ProfileClient::new(transport).with_retry(RetryConfig::new(max_retries, Duration::ZERO)),
    )
}

pub fn profile_json(id: u64) -> Value {
    json!({
        "id": id,
        "firstName": "Terry",
        "lastName": "Medhurst",
        "age": 50,
        "email": format!("atuny{}@sohu.com", id),
        "phone": "+63 791 675 8914",
        "username": format!("atuny{}", id),
        "image": "https://robohash.org/hicveldicta.png",
        "address": {
            "address": "1745 T Street Southeast",
            "city": "Washington",
            "state": "DC",
            "country": "United States"
        },
        "company": {
            "name": "Blanda-O'Keefe",
            "title": "Help Desk Operator"
        }
    })
}

pub fn users_body(records: Vec<Value>) -> Result<TransportResponse, ProfilesError> {
    Ok(TransportResponse::ok(
        json!({ "users": records, "skip": 0, "limit": 10 }).to_string(),
    ))
}

pub fn server_error() -> Result<TransportResponse, ProfilesError> {
    Ok(TransportResponse::new(500, "Internal Server Error"))
}
