use crate::api::KvError;
use crate::cluster::endpoint::{ChunkSource, NodeAddress};
use crate::cluster::operation::StreamCall;
use crate::cluster::router::Router;
use crate::grpc::ProtoKeyValue;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::time::{Duration, Instant};

/// StreamingAdapter opens server-streaming calls on the endpoint the router picks. There's no
/// retry here: a partially consumed stream can't be replayed, the caller re-issues the scan.
pub(crate) struct StreamingAdapter {
    logger: slog::Logger,
    router: Arc<Router>,
    request_timeout: Duration,
}

impl StreamingAdapter {
    pub(crate) fn new(logger: slog::Logger, router: Arc<Router>, request_timeout: Duration) -> Self {
        StreamingAdapter {
            logger,
            router,
            request_timeout,
        }
    }

    pub(crate) async fn open(&self, call: StreamCall) -> Result<EntryStream, KvError> {
        let method = call.method();
        let endpoint = self.router.pick(method.access())?;
        slog::debug!(self.logger, "Opening {} stream on {}", method.name(), endpoint.address());

        let deadline = Instant::now() + self.request_timeout;
        let source = endpoint.invoke_streaming(call, deadline).await?;

        Ok(EntryStream {
            address: endpoint.address().clone(),
            source: Some(source),
            buffered: VecDeque::new(),
            request_timeout: self.request_timeout,
        })
    }
}

/// EntryStream flattens the server's chunks into single entries, pulling the next chunk only
/// once the buffered ones are used up. After end-of-stream or an error it only yields `None`.
pub(crate) struct EntryStream {
    address: NodeAddress,
    source: Option<Box<dyn ChunkSource>>,
    buffered: VecDeque<ProtoKeyValue>,
    request_timeout: Duration,
}

impl EntryStream {
    pub(crate) async fn next_entry(&mut self) -> Result<Option<ProtoKeyValue>, KvError> {
        loop {
            if let Some(entry) = self.buffered.pop_front() {
                return Ok(Some(entry));
            }

            let source = match self.source.as_mut() {
                Some(source) => source,
                None => return Ok(None),
            };

            match tokio::time::timeout(self.request_timeout, source.next_chunk()).await {
                Ok(Ok(Some(chunk))) => self.buffered.extend(chunk),
                Ok(Ok(None)) => {
                    self.source = None;
                    return Ok(None);
                }
                Ok(Err(status)) => {
                    self.source = None;
                    return Err(status.into());
                }
                Err(_) => {
                    self.source = None;
                    return Err(KvError::Timeout {
                        message: format!(
                            "No scan results from {} within {}ms",
                            self.address,
                            self.request_timeout.as_millis()
                        ),
                    });
                }
            }
        }
    }

    /// Drops the underlying call. Dropping the stream does the same.
    pub(crate) fn cancel(&mut self) {
        self.source = None;
        self.buffered.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.source.is_none() && self.buffered.is_empty()
    }
}
