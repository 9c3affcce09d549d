use crate::ORDERS_ENDPOINT;
use crate::domain::order::Order;
use crate::fetch::{CancelSignal, Page, PageFetcher};
use crate::pagination::PaginationState;
use crate::query::QueryKey;
use crate::selection::SelectionModel;
use crate::services::{ServiceError, ServiceResult};

/// Derives the query key for one page of the orders collection.
pub fn orders_query_key(state: &PaginationState, settled_search: &str) -> QueryKey {
    QueryKey::for_page(ORDERS_ENDPOINT, state, settled_search)
}

/// Assembles the orders table presenter over an HTTP fetcher, applying the
/// configured debounce window, page size and request timeout.
#[cfg(feature = "http")]
pub fn orders_table(
    config: &crate::models::config::DashboardConfig,
) -> ServiceResult<crate::table::TablePresenter<crate::fetch::http::HttpPageFetcher<Order>>> {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::fetch::http::HttpPageFetcher;
    use crate::table::TablePresenter;

    let fetcher = HttpPageFetcher::with_timeout(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    let mut presenter = TablePresenter::new(
        Arc::new(fetcher),
        ORDERS_ENDPOINT,
        Duration::from_millis(config.debounce_ms),
    );
    presenter.set_page_size(config.page_size);
    Ok(presenter)
}

/// Loads one page of orders through any fetcher.
pub async fn load_orders_page<F>(
    fetcher: &F,
    key: &QueryKey,
    cancel: CancelSignal,
) -> ServiceResult<Page<Order>>
where
    F: PageFetcher<Item = Order> + ?Sized,
{
    fetcher.fetch_page(key, cancel).await.map_err(|err| {
        log::error!("Failed to load orders page: {err}");
        ServiceError::from(err)
    })
}

/// Orders from `page` whose id is currently selected, in page order.
/// Rows without an id are never selected.
pub fn selected_orders<'a>(page: &'a Page<Order>, selection: &SelectionModel) -> Vec<&'a Order> {
    page.data
        .iter()
        .filter(|order| {
            order
                .id
                .as_deref()
                .is_some_and(|id| selection.is_selected(id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use crate::fetch::{BoxFuture, FetchError, FetchResult, cancel_channel};

    struct FakeFetcher {
        result: FetchResult<Page<Order>>,
    }

    impl PageFetcher for FakeFetcher {
        type Item = Order;

        fn fetch_page<'a>(
            &'a self,
            _key: &'a QueryKey,
            _cancel: CancelSignal,
        ) -> BoxFuture<'a, FetchResult<Page<Order>>> {
            let result = self.result.clone();
            Box::pin(async move { result })
        }
    }

    fn order(id: &str) -> Order {
        Order {
            id: Some(id.try_into().unwrap()),
            owner: None,
            driver: None,
            shipping_address: String::new(),
            current_order_status: OrderStatus::Pending,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn load_propagates_transport_failures() {
        let fetcher = FakeFetcher {
            result: Err(FetchError::Transport("connection refused".into())),
        };
        let key = orders_query_key(&PaginationState::default(), "");
        let (_handle, signal) = cancel_channel();

        let result = load_orders_page(&fetcher, &key, signal).await;

        assert!(matches!(result, Err(ServiceError::Fetch(_))));
    }

    #[tokio::test]
    async fn load_returns_the_fetched_page() {
        let fetcher = FakeFetcher {
            result: Ok(Page {
                data: vec![order("a")],
                total_count: 1,
            }),
        };
        let key = orders_query_key(&PaginationState::default(), "");
        let (_handle, signal) = cancel_channel();

        let page = load_orders_page(&fetcher, &key, signal).await.unwrap();
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn selected_orders_skips_unselected_and_id_less_rows() {
        let page = Page {
            data: vec![
                order("a"),
                order("b"),
                Order {
                    id: None,
                    ..order("ignored")
                },
            ],
            total_count: 3,
        };
        let mut selection = SelectionModel::new();
        selection.toggle("b");

        let selected = selected_orders(&page, &selection);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id.as_deref(), Some("b"));
    }
}
