/// Integration tests for the readiness coordinator
use async_trait::async_trait;
use resilience::{
    Backoff, HandleFactory, ReadinessConfig, ReadinessCoordinator, ReadinessError,
    ReadinessState,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Becomes available on call `available_on` (1-based); `None` never does.
struct MockLibrary {
    calls: Arc<AtomicU32>,
    available_on: Option<u32>,
    fail_with_error: bool,
}

impl MockLibrary {
    fn available_on(k: u32) -> (Self, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Self {
                calls: calls.clone(),
                available_on: Some(k),
                fail_with_error: false,
            },
            calls,
        )
    }

    fn never() -> (Self, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Self {
                calls: calls.clone(),
                available_on: None,
                fail_with_error: false,
            },
            calls,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Handle {
    built_on_attempt: u32,
}

#[async_trait]
impl HandleFactory for MockLibrary {
    type Handle = Handle;

    async fn build(&self) -> anyhow::Result<Option<Handle>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.available_on {
            Some(k) if call >= k => Ok(Some(Handle {
                built_on_attempt: call,
            })),
            _ if self.fail_with_error => Err(anyhow::anyhow!("client constructor threw")),
            _ => Ok(None),
        }
    }
}

fn config(max_attempts: u32) -> ReadinessConfig {
    ReadinessConfig {
        interval: Duration::from_millis(100),
        max_attempts,
        backoff: Backoff::Fixed,
    }
}

// ==================== Resolution Timing ====================

#[tokio::test(start_paused = true)]
async fn test_ready_on_second_attempt_at_200ms() {
    let (library, calls) = MockLibrary::available_on(2);
    let start = Instant::now();
    let coordinator = ReadinessCoordinator::spawn(library, config(3));

    let handle = coordinator
        .wait_until_ready(Duration::from_millis(1_000))
        .await
        .expect("handle should resolve");

    assert_eq!(handle.built_on_attempt, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(200), "resolved early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(210), "resolved late: {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_ready_exactly_on_attempt_k() {
    for k in 1..=5 {
        let (library, calls) = MockLibrary::available_on(k);
        let coordinator = ReadinessCoordinator::spawn(library, config(10));

        let handle = coordinator
            .wait_until_ready(Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(handle.built_on_attempt, k);

        // No attempts continue after Ready
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(calls.load(Ordering::SeqCst), k);
    }
}

#[tokio::test(start_paused = true)]
async fn test_never_available_fails_at_budget() {
    let (library, calls) = MockLibrary::never();
    let start = Instant::now();
    let coordinator = ReadinessCoordinator::spawn(library, config(3));

    let result = coordinator.wait_until_ready(Duration::from_secs(10)).await;

    assert_eq!(
        result,
        Err(ReadinessError::InitializationFailed { attempts: 3 })
    );
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(300), "failed early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(310), "failed late: {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_construction_errors_are_swallowed_while_polling() {
    let calls = Arc::new(AtomicU32::new(0));
    let library = MockLibrary {
        calls: calls.clone(),
        available_on: Some(3),
        fail_with_error: true,
    };
    let coordinator = ReadinessCoordinator::spawn(library, config(5));

    let handle = coordinator
        .wait_until_ready(Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(handle.built_on_attempt, 3);
}

// ==================== Waiters ====================

#[tokio::test(start_paused = true)]
async fn test_concurrent_waiters_share_ready_outcome() {
    let (library, calls) = MockLibrary::available_on(4);
    let coordinator = ReadinessCoordinator::spawn(library, config(10));

    let mut waiters = Vec::new();
    for _ in 0..16 {
        let coordinator = coordinator.clone();
        waiters.push(tokio::spawn(async move {
            coordinator.wait_until_ready(Duration::from_secs(5)).await
        }));
    }

    for waiter in waiters {
        let handle = waiter.await.unwrap().unwrap();
        assert_eq!(handle.built_on_attempt, 4);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_waiters_share_failed_outcome() {
    let (library, _calls) = MockLibrary::never();
    let coordinator = ReadinessCoordinator::spawn(library, config(2));

    let mut waiters = Vec::new();
    for _ in 0..8 {
        let coordinator = coordinator.clone();
        waiters.push(tokio::spawn(async move {
            coordinator.wait_until_ready(Duration::from_secs(5)).await
        }));
    }

    for waiter in waiters {
        assert_eq!(
            waiter.await.unwrap(),
            Err(ReadinessError::InitializationFailed { attempts: 2 })
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_wait_after_ready_resolves_without_new_attempt() {
    let (library, calls) = MockLibrary::available_on(1);
    let coordinator = ReadinessCoordinator::spawn(library, config(3));

    coordinator
        .wait_until_ready(Duration::from_secs(1))
        .await
        .unwrap();

    let start = Instant::now();
    let handle = coordinator
        .wait_until_ready(Duration::from_millis(1))
        .await
        .unwrap();

    assert_eq!(handle.built_on_attempt, 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(coordinator.handle(), Some(handle));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_distinct_from_failure() {
    let (library, _calls) = MockLibrary::available_on(20);
    let coordinator = ReadinessCoordinator::spawn(library, config(30));

    let result = coordinator
        .wait_until_ready(Duration::from_millis(250))
        .await;
    assert_eq!(
        result,
        Err(ReadinessError::Timeout(Duration::from_millis(250)))
    );

    // A timed-out waiter does not disturb polling
    let handle = coordinator
        .wait_until_ready(Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(handle.built_on_attempt, 20);
}

// ==================== Failure and Reinitialization ====================

#[tokio::test(start_paused = true)]
async fn test_no_attempts_after_failure_until_reinitialize() {
    let (library, calls) = MockLibrary::never();
    let coordinator = ReadinessCoordinator::spawn(library, config(3));

    let _ = coordinator.wait_until_ready(Duration::from_secs(5)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // Waiting again reports failure immediately and does not restart polling
    let result = coordinator.wait_until_ready(Duration::from_secs(5)).await;
    assert_eq!(
        result,
        Err(ReadinessError::InitializationFailed { attempts: 3 })
    );
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        coordinator.state(),
        ReadinessState::Failed { attempts: 3 }
    );

    assert!(coordinator.reinitialize());
    let _ = coordinator.wait_until_ready(Duration::from_secs(5)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[tokio::test(start_paused = true)]
async fn test_reinitialize_can_reach_ready() {
    let (library, calls) = MockLibrary::available_on(4);
    let coordinator = ReadinessCoordinator::spawn(library, config(3));

    assert!(coordinator
        .wait_until_ready(Duration::from_secs(1))
        .await
        .is_err());

    assert!(coordinator.reinitialize());
    let handle = coordinator
        .wait_until_ready(Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(handle.built_on_attempt, 4);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_observe_transitions() {
    let (library, _calls) = MockLibrary::available_on(2);
    let coordinator = ReadinessCoordinator::spawn(library, config(3));
    let mut receiver = coordinator.subscribe();

    let ready = receiver
        .wait_for(|state| matches!(state, ReadinessState::Ready(_)))
        .await
        .map(|state| state.clone())
        .unwrap();

    assert_eq!(
        ready,
        ReadinessState::Ready(Handle {
            built_on_attempt: 2
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_exponential_backoff_budget() {
    let (library, calls) = MockLibrary::never();
    let start = Instant::now();
    let config = ReadinessConfig {
        interval: Duration::from_millis(100),
        max_attempts: 4,
        backoff: Backoff::Exponential {
            multiplier: 2.0,
            max_delay: Duration::from_millis(400),
            jitter: false,
        },
    };
    assert_eq!(config.budget(), Duration::from_millis(1_100));

    let coordinator = ReadinessCoordinator::spawn(library, config);
    let _ = coordinator.wait_until_ready(Duration::from_secs(10)).await;

    // 100 + 200 + 400 + 400
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1_100));
    assert!(elapsed < Duration::from_millis(1_110));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}
