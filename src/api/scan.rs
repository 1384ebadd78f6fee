use crate::api::validation::validate_bound;
use crate::api::KvError;
use crate::cluster::EntryStream;
use crate::grpc::{ProtoKeyValue, ProtoScanReq};
use bytes::Bytes;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyValue {
    pub key: Bytes,
    pub value: Bytes,
}

impl From<ProtoKeyValue> for KeyValue {
    fn from(entry: ProtoKeyValue) -> Self {
        KeyValue {
            key: Bytes::from(entry.key),
            value: Bytes::from(entry.value),
        }
    }
}

/// ScanOptions filters a scan. Filters combine: a prefix and a suffix together match keys that
/// have both. The range is `[start, end)`. An empty filter is the same as no filter.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanOptions {
    prefix: Option<Bytes>,
    suffix: Option<Bytes>,
    start: Option<Bytes>,
    end: Option<Bytes>,
    limit: Option<u32>,
    reverse: bool,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl AsRef<[u8]>) -> Self {
        self.prefix = non_empty(prefix);
        self
    }

    pub fn suffix(mut self, suffix: impl AsRef<[u8]>) -> Self {
        self.suffix = non_empty(suffix);
        self
    }

    /// Inclusive lower bound.
    pub fn start(mut self, start: impl AsRef<[u8]>) -> Self {
        self.start = non_empty(start);
        self
    }

    /// Exclusive upper bound.
    pub fn end(mut self, end: impl AsRef<[u8]>) -> Self {
        self.end = non_empty(end);
        self
    }

    /// At most `limit` entries. Zero means unlimited.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = if limit == 0 { None } else { Some(limit) };
        self
    }

    /// Descending key order instead of ascending.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), KvError> {
        validate_bound("prefix", self.prefix.as_deref())?;
        validate_bound("suffix", self.suffix.as_deref())?;
        validate_bound("start", self.start.as_deref())?;
        validate_bound("end", self.end.as_deref())?;
        Ok(())
    }

    pub(crate) fn into_proto(self) -> ProtoScanReq {
        fn bytes(bound: Option<Bytes>) -> Vec<u8> {
            bound.map(|b| b.to_vec()).unwrap_or_default()
        }

        ProtoScanReq {
            prefix: bytes(self.prefix),
            suffix: bytes(self.suffix),
            start: bytes(self.start),
            end: bytes(self.end),
            limit: self.limit.unwrap_or(0),
            reverse: self.reverse,
        }
    }
}

fn non_empty(bound: impl AsRef<[u8]>) -> Option<Bytes> {
    let bound = bound.as_ref();
    if bound.is_empty() {
        None
    } else {
        Some(Bytes::copy_from_slice(bound))
    }
}

/// ScanStream yields entries as the server sends them. It is forward-only: to scan again, start a
/// new scan. Dropping it before the end cancels the call on the server.
pub struct ScanStream {
    inner: EntryStream,
    in_transaction: bool,
}

impl ScanStream {
    pub(crate) fn new(inner: EntryStream) -> Self {
        ScanStream {
            inner,
            in_transaction: false,
        }
    }

    /// A stream over a transaction's view. Failures mid-stream are reported like every other
    /// transaction failure.
    pub(crate) fn for_transaction(inner: EntryStream) -> Self {
        ScanStream {
            inner,
            in_transaction: true,
        }
    }

    /// The next entry, or `None` once the server has sent everything. Errors end the stream.
    pub async fn next(&mut self) -> Result<Option<KeyValue>, KvError> {
        match self.inner.next_entry().await {
            Ok(entry) => Ok(entry.map(KeyValue::from)),
            Err(e) if self.in_transaction => Err(e.into_transaction_error()),
            Err(e) => Err(e),
        }
    }

    /// Drains the rest of the stream.
    pub async fn collect(mut self) -> Result<Vec<KeyValue>, KvError> {
        let mut entries = Vec::new();
        while let Some(entry) = self.next().await? {
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Stops the scan early. Equivalent to dropping the stream.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}
