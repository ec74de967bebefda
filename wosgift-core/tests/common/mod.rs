// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use wosgift_core::http::{FormResponse, HttpClient};
use wosgift_core::Error;

/// One scripted exchange for the mock client.
pub enum Step {
    Respond { status: u16, body: String },
    NetworkError(String),
}

pub fn player_ok(nickname: &str) -> Step {
    Step::Respond {
        status: 200,
        body: format!(
            r#"{{"code":0,"data":{{"nickname":"{nickname}","avatar_image":"http://img/{nickname}.png"}},"msg":"success"}}"#
        ),
    }
}

pub fn no_data(msg: &str) -> Step {
    Step::Respond {
        status: 200,
        body: format!(r#"{{"code":1,"msg":"{msg}","err_code":40004}}"#),
    }
}

pub fn gift_msg(msg: &str) -> Step {
    Step::Respond {
        status: 200,
        body: format!(r#"{{"code":0,"msg":"{msg}"}}"#),
    }
}

pub fn rate_limited() -> Step {
    Step::Respond {
        status: 429,
        body: String::new(),
    }
}

pub fn server_error(status: u16) -> Step {
    Step::Respond {
        status,
        body: String::new(),
    }
}

pub fn network_error() -> Step {
    Step::NetworkError("connection reset by peer".to_string())
}

#[derive(Clone)]
pub struct RecordedCall {
    pub url: String,
    pub form: Vec<(String, String)>,
    pub at: Instant,
}

/// Mock client that replays a fixed script and records every call with
/// the (virtual) time it was made.
pub struct ScriptedClient {
    script: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(steps.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<FormResponse, Error> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            form: form.to_vec(),
            at: Instant::now(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(Step::Respond { status, body }) => Ok(FormResponse { status, body }),
            Some(Step::NetworkError(msg)) => Err(Error::Transport(msg)),
            None => panic!("mock client called more times than scripted"),
        }
    }
}
