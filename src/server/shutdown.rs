use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

pub(crate) fn shutdown_signal() -> (KvServerShutdownHandle, KvServerShutdownSignal) {
    let (tx, rx) = oneshot::channel();

    (KvServerShutdownHandle { tx: Some(tx) }, KvServerShutdownSignal { rx })
}

/// Stops the server when dropped, or earlier via `shutdown()`.
pub(crate) struct KvServerShutdownHandle {
    tx: Option<oneshot::Sender<()>>,
}

impl KvServerShutdownHandle {
    pub(crate) fn shutdown(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(());
        }
    }
}

pub(crate) struct KvServerShutdownSignal {
    rx: oneshot::Receiver<()>,
}

impl Future for KvServerShutdownSignal {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Sent or dropped, either way we stop.
        Pin::new(&mut self.rx).poll(cx).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    #[tokio::test]
    async fn dropping_the_handle_fires_the_signal() {
        let (handle, signal) = shutdown_signal();
        drop(handle);
        tokio::time::timeout(Duration::from_secs(1), signal).await.unwrap();
    }

    #[tokio::test]
    async fn explicit_shutdown_fires_the_signal() {
        let (mut handle, signal) = shutdown_signal();
        handle.shutdown();
        handle.shutdown();
        tokio::time::timeout(Duration::from_secs(1), signal).await.unwrap();
    }
}
