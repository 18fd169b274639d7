use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::controller::protocol::{ENDPOINT_REGISTER, RegisterRequest, http_base};

pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Where this Node stands with the Controller.
///
/// There is no way back to `Unregistered`: the Node never deregisters and a failed
/// heartbeat does not undo an earlier success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Registered,
}

pub struct ControllerClient {
    http_client: reqwest::Client,
    register_url: String,
}

impl ControllerClient {
    pub fn new(controller_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            register_url: format!("{}{}", http_base(controller_url), ENDPOINT_REGISTER),
        }
    }

    pub async fn register(&self, address: &str) -> Result<()> {
        let payload = RegisterRequest {
            address: Some(address.to_string()),
        };
        let response = self
            .http_client
            .post(&self.register_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Registration rejected: {}",
                response.status()
            ));
        }
        Ok(())
    }
}

/// Recurring registration of one Node with the Controller.
pub struct Heartbeat {
    address: String,
    client: ControllerClient,
    interval: Duration,
    state: RwLock<RegistrationState>,
}

impl Heartbeat {
    pub fn new(address: &str, controller_url: &str, interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            address: address.to_string(),
            client: ControllerClient::new(controller_url),
            interval: interval.max(Duration::from_millis(1)),
            state: RwLock::new(RegistrationState::Unregistered),
        })
    }

    pub async fn state(&self) -> RegistrationState {
        *self.state.read().await
    }

    /// One registration attempt.
    pub async fn beat(&self) -> Result<()> {
        self.client.register(&self.address).await?;

        let mut state = self.state.write().await;
        if *state == RegistrationState::Unregistered {
            tracing::info!("Registered with controller as {}", self.address);
        } else {
            tracing::debug!("Heartbeat sent to controller as {}", self.address);
        }
        *state = RegistrationState::Registered;
        Ok(())
    }

    /// Spawns the heartbeat loop: one beat immediately, then one per interval.
    ///
    /// Failures are logged and dropped. The next tick is the only retry.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tracing::info!(
            "Starting heartbeat for {} every {:?}",
            self.address,
            self.interval
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if let Err(e) = self.beat().await {
                    tracing::warn!("Could not contact controller, retrying next tick: {}", e);
                }
            }
        })
    }
}
