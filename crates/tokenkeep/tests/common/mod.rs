//! Shared fixtures for the session holder tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use tokenkeep::error::{ProtocolError, TransportError};
use tokenkeep::{
    Bootstrap, Error, Origin, RefreshState, Result, StaticEnvironment, TokenFetcher, TokenGrant,
    User,
};
use url::Url;

/// A token fetcher that replays a script of outcomes and records every call.
///
/// Once the script is exhausted every call fails with a connection error.
#[derive(Default)]
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<TokenGrant>>>,
    calls: Mutex<Vec<Url>>,
}

impl ScriptedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn grant(&self, token: &str, period: Option<f64>) -> &Self {
        self.push(Ok(TokenGrant {
            token: token.to_string(),
            token_refresh_period: period,
        }))
    }

    pub fn status(&self, status: u16) -> &Self {
        self.push(Err(ProtocolError::new(status, None).into()))
    }

    pub fn network_error(&self) -> &Self {
        self.push(Err(TransportError::Connection {
            message: "connection refused".to_string(),
        }
        .into()))
    }

    fn push(&self, outcome: Result<TokenGrant>) -> &Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &Url) -> Result<TokenGrant> {
        self.calls.lock().unwrap().push(url.clone());
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(Error::from(TransportError::Connection {
                message: "script exhausted".to_string(),
            }))
        })
    }
}

/// A token fetcher whose requests never complete.
#[derive(Default)]
pub struct HangingFetcher {
    calls: Mutex<usize>,
}

impl HangingFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TokenFetcher for HangingFetcher {
    async fn fetch(&self, _url: &Url) -> Result<TokenGrant> {
        *self.calls.lock().unwrap() += 1;
        std::future::pending().await
    }
}

pub fn bootstrap(token: &str, period: Option<f64>) -> Bootstrap {
    Bootstrap {
        auth_token: token.to_string(),
        auth_refresh_period: period,
        user: Some(User::new("alice")),
        logout_url: "https://sso.example.com/logout".to_string(),
    }
}

pub fn environment(origin: &str, base_href: &str) -> Arc<StaticEnvironment> {
    Arc::new(StaticEnvironment::new(Origin::new(origin).unwrap(), base_href))
}

/// Waits for the next settled state, skipping the transient `Refreshing`.
pub async fn next_settled(rx: &mut watch::Receiver<RefreshState>) -> RefreshState {
    loop {
        rx.changed().await.expect("session holder dropped");
        let state = *rx.borrow_and_update();
        if state != RefreshState::Refreshing {
            return state;
        }
    }
}
