//! Discovery timer backed by `tokio::time`.

use std::collections::HashMap;
use std::time::Duration;

use pinio_core::{DiscoveryTimer, TimeoutToken};
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::actor::Request;

/// Arms each timeout as a sleeping task that posts the expiry back to the
/// owning actor. Holds only a weak sender so pending timeouts never keep the
/// actor alive.
pub struct TokioTimer {
    requests: WeakUnboundedSender<Request>,
    pending: HashMap<TimeoutToken, JoinHandle<()>>,
}

impl TokioTimer {
    pub(crate) fn new(requests: WeakUnboundedSender<Request>) -> Self {
        Self {
            requests,
            pending: HashMap::new(),
        }
    }

    fn reap_finished(&mut self) {
        self.pending.retain(|_, task| !task.is_finished());
    }
}

impl DiscoveryTimer for TokioTimer {
    fn arm(&mut self, token: TimeoutToken, after: Duration) {
        self.reap_finished();
        let requests = self.requests.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let delivered = requests
                .upgrade()
                .is_some_and(|requests| requests.send(Request::Timeout(token)).is_ok());
            trace!(token = token.get(), delivered, "discovery timeout expired");
        });
        self.pending.insert(token, task);
    }

    fn cancel(&mut self, token: TimeoutToken) {
        if let Some(task) = self.pending.remove(&token) {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }
}
