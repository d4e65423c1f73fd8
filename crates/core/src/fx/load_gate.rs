use std::time::Duration;

use tokio::sync::watch;

use super::fx_errors::FxError;

/// One-way "first load completed" signal.
///
/// Queries wait on the gate, bounded by a timeout, until any batch has been
/// recorded. Once open the gate never closes again.
#[derive(Debug)]
pub struct LoadGate {
    loaded: watch::Sender<bool>,
}

impl Default for LoadGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadGate {
    pub fn new() -> Self {
        let (loaded, _) = watch::channel(false);
        Self { loaded }
    }

    pub fn open(&self) {
        self.loaded.send_if_modified(|loaded| {
            let changed = !*loaded;
            *loaded = true;
            changed
        });
    }

    pub fn is_open(&self) -> bool {
        *self.loaded.borrow()
    }

    /// Waits until the gate opens or `timeout` elapses.
    pub async fn wait(&self, timeout: Duration) -> Result<(), FxError> {
        let mut receiver = self.loaded.subscribe();

        let outcome = tokio::time::timeout(timeout, receiver.wait_for(|loaded| *loaded))
            .await
            .map(|waited| waited.map(|_| ()));

        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(FxError::DataNotYetLoaded(
                "load signal was dropped".to_string(),
            )),
            Err(_) => Err(FxError::DataNotYetLoaded(format!(
                "no rates loaded within {}s",
                timeout.as_secs()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_open_gate_does_not_wait() {
        let gate = LoadGate::new();
        gate.open();
        assert!(gate.is_open());
        gate.wait(Duration::from_millis(1)).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_gate_times_out() {
        let gate = LoadGate::new();
        let err = gate.wait(Duration::from_secs(30)).await.unwrap_err();
        assert!(matches!(err, FxError::DataNotYetLoaded(_)));
        assert!(!gate.is_open());
    }

    #[tokio::test]
    async fn test_waiter_released_when_gate_opens() {
        let gate = Arc::new(LoadGate::new());
        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.wait(Duration::from_secs(5)).await })
        };

        tokio::task::yield_now().await;
        gate.open();

        waiter.await.unwrap().unwrap();
    }
}
