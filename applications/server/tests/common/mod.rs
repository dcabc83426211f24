//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tonic::transport::Channel;
use user_core::{NewUser, Result, StoreError, User, UserChanges, UserId, UserStore};
use user_server::{
    proto::user_service_client::UserServiceClient, server, Lifecycle, Phase,
};

/// In-memory `UserStore` with the same observable behavior as the
/// PostgreSQL store, plus fault injection and an optional per-call delay
#[derive(Default)]
pub struct MemoryUserStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    rows: BTreeMap<UserId, User>,
    fail_with: Option<fn() -> StoreError>,
    delay: Option<Duration>,
}

impl MemoryUserStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following call fail with the produced error
    pub fn fail_with(&self, make_error: fn() -> StoreError) {
        self.state.lock().unwrap().fail_with = Some(make_error);
    }

    /// Hold every following call for `delay` before answering
    pub fn delay_calls(&self, delay: Duration) {
        self.state.lock().unwrap().delay = Some(delay);
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    async fn enter(&self) -> Result<()> {
        let (delay, fail_with) = {
            let state = self.state.lock().unwrap();
            (state.delay, state.fail_with)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match fail_with {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: UserId::new(state.next_id),
            name: user.name,
            email: user.email,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        self.enter().await?;
        self.state
            .lock()
            .unwrap()
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("User", id))
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        let user = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("User", id))?;
        user.name = changes.name;
        user.email = changes.email;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<u64> {
        self.enter().await?;
        let removed = self.state.lock().unwrap().rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

/// A server running on an ephemeral local port
pub struct TestServer {
    pub addr: SocketAddr,
    pub lifecycle: Lifecycle,
    pub handle: JoinHandle<user_server::Result<()>>,
}

impl TestServer {
    /// Serve `store` on 127.0.0.1 and wait until the server reports Serving
    pub async fn start(store: Arc<MemoryUserStore>) -> Self {
        let listener = server::bind("127.0.0.1:0".parse().unwrap())
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();

        let lifecycle = Lifecycle::new();
        let mut phases = lifecycle.subscribe();

        let task_lifecycle = lifecycle.clone();
        let handle = tokio::spawn(async move {
            server::serve(listener, store, &task_lifecycle).await
        });

        phases
            .wait_for(|phase| *phase == Phase::Serving)
            .await
            .expect("Server never reached Serving");

        Self {
            addr,
            lifecycle,
            handle,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn channel(&self) -> Channel {
        Channel::from_shared(self.endpoint())
            .unwrap()
            .connect()
            .await
            .expect("Failed to connect to test server")
    }

    pub async fn client(&self) -> UserServiceClient<Channel> {
        UserServiceClient::new(self.channel().await)
    }

    /// Request shutdown and wait for the serve loop to drain and return
    pub async fn stop(self) -> user_server::Result<()> {
        self.lifecycle.shutdown();
        tokio::time::timeout(Duration::from_secs(10), self.handle)
            .await
            .expect("Server did not drain in time")
            .expect("Server task panicked")
    }
}
