//! In-memory transport for unit tests.

use std::{collections::HashMap, sync::Mutex};

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::{client::Transport, error::ClientError};

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

type Reply = Result<Value, (u16, Option<String>)>;

/// Replies are keyed by path; unknown paths answer `null`.
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<Request>>,
}

impl FakeTransport {
    pub fn respond(&self, path: &str, body: Value) {
        self.set(path, Ok(body));
    }

    pub fn fail(&self, path: &str, status: u16, message: Option<&str>) {
        self.set(path, Err((status, message.map(str::to_string))));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != "GET")
            .collect()
    }

    fn set(&self, path: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(path.to_string(), reply);
    }

    fn handle(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.requests.lock().unwrap().push(Request {
            method,
            path: path.to_string(),
            body,
        });
        match self.replies.lock().unwrap().get(path).cloned() {
            None => Ok(Value::Null),
            Some(Ok(body)) => Ok(body),
            Some(Err((status, message))) => Err(ClientError::Server {
                status: StatusCode::from_u16(status).unwrap(),
                message,
            }),
        }
    }
}

impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.handle("GET", path, None)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.handle("POST", path, Some(body))
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.handle("PUT", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.handle("DELETE", path, None)
    }
}

pub fn tx_json(id: i64, member_id: i64, game_id: i64) -> Value {
    json!({
        "transactionId": id,
        "memberId": member_id,
        "gameId": game_id,
        "playTimeHrs": 1.5,
        "cost": 9.99,
        "transactionDate": "2024-01-01T10:00:00.000Z",
    })
}

pub fn member_json(id: i64, name: &str) -> Value {
    json!({ "memberId": id, "name": name })
}

pub fn game_json(id: i64, name: &str) -> Value {
    json!({ "gameId": id, "gameName": name })
}
