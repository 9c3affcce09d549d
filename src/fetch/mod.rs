//! Page fetch contract: one read request per query key, cancellable.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::query::QueryKey;

pub mod errors;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use errors::{FetchError, FetchResult};

/// Boxed future returned by dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One fetched slice of a server-side paginated collection.
///
/// Immutable once fetched; a refetch replaces it wholesale. The wire shape
/// is `{"data": [...], "totalCount": n}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total_count: 0,
        }
    }
}

/// Creates a linked cancellation pair.
///
/// Cancelling (or dropping) the handle wakes every clone of the signal.
pub fn cancel_channel() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

/// Owner side of a cancellation pair. Dropping it cancels the signal.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Observer side of a cancellation pair, passed into a fetch.
///
/// Once cancelled, the fetch abandons any partial work and resolves to
/// [`FetchError::Cancelled`]; it must not mutate state afterwards.
#[derive(Clone, Debug)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves when the handle cancels or is dropped. Never resolves
    /// otherwise, so this is only useful inside `tokio::select!`.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }

}

/// Issues one read request for a query key and returns a page of results
/// plus the total count.
///
/// Implementations must honor the cancel signal and must not retry; retry
/// policy belongs to the caller.
pub trait PageFetcher: Send + Sync {
    type Item;

    fn fetch_page<'a>(
        &'a self,
        key: &'a QueryKey,
        cancel: CancelSignal,
    ) -> BoxFuture<'a, FetchResult<Page<Self::Item>>>;
}
