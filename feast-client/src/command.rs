//! Optimistic updates
//!
//! A command changes observable state immediately, then asks the backend
//! to make the change for real. If the backend refuses, the command undoes
//! its own change on whatever the state has become, leaving changes made by
//! other commands in the meantime alone.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::error::{ClientError, ClientResult};

#[async_trait]
pub trait OptimisticCommand: Send + Sync {
    type State: Clone + PartialEq + Send + Sync;
    type Output: Send;

    /// Commands with equal keys never run concurrently
    fn key(&self) -> String;

    /// State the command edits
    fn target(&self) -> &watch::Sender<Self::State>;

    /// Optimistic version of `current`
    fn apply(&self, current: &Self::State) -> Self::State;

    /// `current` with this command's change taken back out
    ///
    /// `current` may include changes other commands made after `apply`.
    fn revert(&self, current: &Self::State) -> Self::State;

    /// Perform the change on the backend
    async fn commit(&self) -> ClientResult<Self::Output>;
}

/// Runs [`OptimisticCommand`]s, rejecting re-entry per key
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Releases a key when the command finishes or is dropped mid-flight
struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.keys.lock().remove(&self.key);
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self, key: &str) -> bool {
        self.in_flight.lock().contains(key)
    }

    /// Apply, commit, and roll back on failure
    ///
    /// Fails with [`ClientError::Busy`] without touching state when a
    /// command with the same key is still running.
    pub async fn run<C: OptimisticCommand>(&self, command: &C) -> ClientResult<C::Output> {
        let key = command.key();
        if !self.in_flight.lock().insert(key.clone()) {
            return Err(ClientError::Busy(key));
        }
        let _guard = InFlight {
            keys: self.in_flight.clone(),
            key: key.clone(),
        };

        command.target().send_modify(|state| *state = command.apply(state));

        match command.commit().await {
            Ok(output) => Ok(output),
            Err(err) => {
                let restored = command.target().send_if_modified(|state| {
                    let reverted = command.revert(state);
                    if reverted == *state {
                        return false;
                    }
                    *state = reverted;
                    true
                });
                tracing::warn!(key = %key, restored, error = %err, "Optimistic update failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Notify;

    struct Increment {
        state: watch::Sender<i32>,
        fail: bool,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl OptimisticCommand for Increment {
        type State = i32;
        type Output = ();

        fn key(&self) -> String {
            "counter".into()
        }

        fn target(&self) -> &watch::Sender<i32> {
            &self.state
        }

        fn apply(&self, current: &i32) -> i32 {
            current + 1
        }

        fn revert(&self, current: &i32) -> i32 {
            current - 1
        }

        async fn commit(&self) -> ClientResult<()> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                Err(ClientError::Network("down".into()))
            } else {
                Ok(())
            }
        }
    }

    fn counter(fail: bool, gate: Option<Arc<Notify>>) -> Increment {
        let (state, _) = watch::channel(0);
        Increment { state, fail, gate }
    }

    #[tokio::test]
    async fn test_success_keeps_optimistic_state() {
        let executor = CommandExecutor::new();
        let cmd = counter(false, None);
        executor.run(&cmd).await.unwrap();
        assert_eq!(*cmd.state.borrow(), 1);
    }

    #[tokio::test]
    async fn test_failure_rolls_back() {
        let executor = CommandExecutor::new();
        let cmd = counter(true, None);
        assert!(executor.run(&cmd).await.is_err());
        assert_eq!(*cmd.state.borrow(), 0);
        assert!(!executor.is_busy("counter"));
    }

    #[tokio::test]
    async fn test_rollback_keeps_changes_made_meanwhile() {
        let executor = CommandExecutor::new();
        let gate = Arc::new(Notify::new());
        let cmd = Arc::new(counter(true, Some(gate.clone())));

        let task = {
            let executor = executor.clone();
            let cmd = cmd.clone();
            tokio::spawn(async move { executor.run(cmd.as_ref()).await })
        };
        while *cmd.state.borrow() != 1 {
            tokio::task::yield_now().await;
        }
        cmd.state.send_replace(42);
        gate.notify_one();

        assert!(task.await.unwrap().is_err());
        assert_eq!(*cmd.state.borrow(), 41);
    }

    #[tokio::test]
    async fn test_reentry_is_rejected() {
        let executor = CommandExecutor::new();
        let gate = Arc::new(Notify::new());
        let first = Arc::new(counter(false, Some(gate.clone())));

        let task = {
            let executor = executor.clone();
            let first = first.clone();
            tokio::spawn(async move { executor.run(first.as_ref()).await })
        };
        while !executor.is_busy("counter") {
            tokio::task::yield_now().await;
        }

        let second = counter(false, None);
        let err = executor.run(&second).await.unwrap_err();
        assert!(matches!(err, ClientError::Busy(ref k) if k == "counter"));
        assert_eq!(*second.state.borrow(), 0);

        gate.notify_one();
        task.await.unwrap().unwrap();
        assert!(!executor.is_busy("counter"));
    }
}
