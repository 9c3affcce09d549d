//! Mock page fetcher for isolating consumers in tests.

use mockall::mock;

use crate::domain::order::Order;
use crate::fetch::{BoxFuture, CancelSignal, FetchResult, Page, PageFetcher};
use crate::query::QueryKey;

mock! {
    pub OrdersFetcher {}

    impl PageFetcher for OrdersFetcher {
        type Item = Order;

        fn fetch_page<'a>(
            &'a self,
            key: &'a QueryKey,
            cancel: CancelSignal,
        ) -> BoxFuture<'a, FetchResult<Page<Order>>>;
    }
}
