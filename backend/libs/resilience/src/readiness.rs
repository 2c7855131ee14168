//! Readiness coordinator for a shared client handle
//!
//! State transitions:
//! - Uninitialized → Polling: on `start` (done by `spawn`, `wait_until_ready` or `reinitialize`)
//! - Polling → Ready: a construction attempt produced a handle
//! - Polling → Failed: the attempt budget ran out
//! - Failed → Uninitialized → Polling: only through `reinitialize`
//!
//! Every attempt waits one backoff delay first, so with fixed backoff attempt `k`
//! runs at `k × interval`.

use crate::backoff::Backoff;
use crate::metrics::ReadinessMetrics;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Builds the shared handle.
///
/// `Ok(None)` means the dependency is not available yet and the coordinator should
/// try again on the next tick. Errors are logged and treated the same way.
#[async_trait]
pub trait HandleFactory: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    async fn build(&self) -> anyhow::Result<Option<Self::Handle>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadinessState<H> {
    Uninitialized,
    Polling { attempt: u32 },
    Ready(H),
    Failed { attempts: u32 },
}

impl<H> ReadinessState<H> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReadinessState::Ready(_) | ReadinessState::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessState::Uninitialized => "uninitialized",
            ReadinessState::Polling { .. } => "polling",
            ReadinessState::Ready(_) => "ready",
            ReadinessState::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadinessError {
    #[error("Remote handle not ready after {0:?}")]
    Timeout(Duration),
    #[error("Remote handle initialization failed after {attempts} attempts")]
    InitializationFailed { attempts: u32 },
}

/// Client environments with different script/network start-up characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Desktop,
    Mobile,
    Safari,
    InstalledApp,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Platform::Desktop),
            "mobile" => Ok(Platform::Mobile),
            "safari" => Ok(Platform::Safari),
            "pwa" | "installed-app" | "installed_app" => Ok(Platform::InstalledApp),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Desktop => "desktop",
            Platform::Mobile => "mobile",
            Platform::Safari => "safari",
            Platform::InstalledApp => "installed-app",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessConfig {
    /// Delay before the first attempt and base delay between attempts
    pub interval: Duration,
    /// Attempt budget; reaching it without a handle means Failed
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self::for_platform(Platform::Desktop)
    }
}

impl ReadinessConfig {
    /// Budgets per platform
    ///
    /// - Desktop: 50 attempts × 100ms (5s)
    /// - Mobile, Safari, installed app: 150 attempts × 100ms (15s), slower start-up
    pub fn for_platform(platform: Platform) -> Self {
        let max_attempts = match platform {
            Platform::Desktop => 50,
            Platform::Mobile | Platform::Safari | Platform::InstalledApp => 150,
        };

        Self {
            interval: Duration::from_millis(100),
            max_attempts,
            backoff: Backoff::Fixed,
        }
    }

    /// Time from start until Failed when nothing ever becomes available (without jitter).
    pub fn budget(&self) -> Duration {
        self.backoff.total_budget(self.interval, self.max_attempts)
    }
}

type StateSender<H> = Arc<watch::Sender<ReadinessState<H>>>;

pub struct ReadinessCoordinator<F: HandleFactory> {
    factory: Arc<F>,
    config: ReadinessConfig,
    state: StateSender<F::Handle>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl<F: HandleFactory> ReadinessCoordinator<F> {
    /// Create an idle coordinator. Nothing runs until `start` or `wait_until_ready`.
    pub fn new(factory: F, config: ReadinessConfig) -> Self {
        let (state, _) = watch::channel(ReadinessState::Uninitialized);

        Self {
            factory: Arc::new(factory),
            config,
            state: Arc::new(state),
            poller: Mutex::new(None),
        }
    }

    /// Create a coordinator and begin polling right away. Must be called inside a tokio runtime.
    pub fn spawn(factory: F, config: ReadinessConfig) -> Arc<Self> {
        let coordinator = Arc::new(Self::new(factory, config));
        coordinator.start();
        coordinator
    }

    pub fn config(&self) -> &ReadinessConfig {
        &self.config
    }

    /// Begin polling if the coordinator is Uninitialized. Returns whether polling started.
    pub fn start(&self) -> bool {
        let mut poller = self.poller.lock();
        self.start_locked(&mut poller)
    }

    fn start_locked(&self, poller: &mut Option<JoinHandle<()>>) -> bool {
        let started = self.state.send_if_modified(|state| {
            if matches!(state, ReadinessState::Uninitialized) {
                *state = ReadinessState::Polling { attempt: 0 };
                true
            } else {
                false
            }
        });

        if !started {
            return false;
        }

        info!(
            max_attempts = self.config.max_attempts,
            interval_ms = self.config.interval.as_millis() as u64,
            budget_ms = self.config.budget().as_millis() as u64,
            "Starting remote handle readiness polling"
        );

        let task = tokio::spawn(poll_until_terminal(
            self.factory.clone(),
            self.config.clone(),
            self.state.clone(),
        ));
        if let Some(previous) = poller.replace(task) {
            previous.abort();
        }
        true
    }

    /// Restart the state machine after Failed. Ignored in any other state.
    pub fn reinitialize(&self) -> bool {
        let mut poller = self.poller.lock();

        let reset = self.state.send_if_modified(|state| {
            if matches!(state, ReadinessState::Failed { .. }) {
                *state = ReadinessState::Uninitialized;
                true
            } else {
                false
            }
        });

        if !reset {
            debug!(
                state = self.state.borrow().label(),
                "Reinitialization ignored outside the failed state"
            );
            return false;
        }

        info!("Reinitializing remote handle after failure");
        self.start_locked(&mut poller)
    }

    /// Resolve the shared handle, waiting at most `timeout`.
    ///
    /// All callers waiting on the same run observe the same terminal state.
    pub async fn wait_until_ready(&self, timeout: Duration) -> Result<F::Handle, ReadinessError> {
        if let ReadinessState::Ready(handle) = &*self.state.borrow() {
            return Ok(handle.clone());
        }

        let mut receiver = self.state.subscribe();
        self.start();

        let terminal = tokio::time::timeout(timeout, async move {
            receiver
                .wait_for(|state| state.is_terminal())
                .await
                .map(|state| state.clone())
        })
        .await;

        match terminal {
            Ok(Ok(ReadinessState::Ready(handle))) => Ok(handle),
            Ok(Ok(ReadinessState::Failed { attempts })) => {
                Err(ReadinessError::InitializationFailed { attempts })
            }
            Ok(Ok(_)) | Ok(Err(_)) => Err(ReadinessError::InitializationFailed { attempts: 0 }),
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "Timed out waiting for remote handle");
                Err(ReadinessError::Timeout(timeout))
            }
        }
    }

    /// Current handle for callers that check readiness without waiting.
    pub fn handle(&self) -> Option<F::Handle> {
        match &*self.state.borrow() {
            ReadinessState::Ready(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn state(&self) -> ReadinessState<F::Handle> {
        self.state.borrow().clone()
    }

    /// Watch state transitions directly.
    pub fn subscribe(&self) -> watch::Receiver<ReadinessState<F::Handle>> {
        self.state.subscribe()
    }
}

impl<F: HandleFactory> Drop for ReadinessCoordinator<F> {
    fn drop(&mut self) {
        if let Some(task) = self.poller.get_mut().take() {
            task.abort();
        }
    }
}

async fn poll_until_terminal<F: HandleFactory>(
    factory: Arc<F>,
    config: ReadinessConfig,
    state: StateSender<F::Handle>,
) {
    let mut delay = config.interval;

    for attempt in 1..=config.max_attempts {
        tokio::time::sleep(config.backoff.effective_delay(delay)).await;
        state.send_replace(ReadinessState::Polling { attempt });

        match factory.build().await {
            Ok(Some(handle)) => {
                info!(attempt, "Remote handle ready");
                ReadinessMetrics::record_attempt("ready");
                ReadinessMetrics::record_outcome("ready", attempt);
                state.send_replace(ReadinessState::Ready(handle));
                return;
            }
            Ok(None) => {
                debug!(attempt, "Remote handle dependency not available yet");
                ReadinessMetrics::record_attempt("pending");
            }
            Err(e) => {
                warn!(attempt, error = %e, "Remote handle construction failed");
                ReadinessMetrics::record_attempt("error");
            }
        }

        delay = config.backoff.next_delay(delay);
    }

    warn!(
        attempts = config.max_attempts,
        "Remote handle unavailable, readiness budget exhausted"
    );
    ReadinessMetrics::record_outcome("failed", config.max_attempts);
    state.send_replace(ReadinessState::Failed {
        attempts: config.max_attempts,
    });
}
