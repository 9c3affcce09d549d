//! Orders table presenter: composes pagination, search debouncing, row
//! selection and the page fetcher into one state machine.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;

use crate::debounce::Debounced;
use crate::domain::order::Order;
use crate::domain::types::OrderId;
use crate::fetch::{CancelHandle, FetchError, FetchResult, Page, PageFetcher, cancel_channel};
use crate::pagination::PaginationState;
use crate::query::QueryKey;
use crate::routes::{Navigator, view_detail};
use crate::selection::SelectionModel;

/// Column headers of the orders table, leading checkbox column included.
pub const ORDER_TABLE_HEAD: [&str; 7] = [
    "",
    "Owner Name",
    "Owner Phone",
    "Driver Name",
    "Driver Phone",
    "Shipping Address",
    "Status",
];

/// A row the table can select and open.
pub trait TableRow {
    /// Identifier of the row, if the backend supplied one.
    fn row_id(&self) -> Option<&str>;
}

impl TableRow for Order {
    fn row_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Rendering state of the table.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    /// No usable data yet; the first fetch for the current key is pending.
    Loading,
    /// A page with at least one matching row.
    Loaded(Page<T>),
    /// The backend reported zero matching rows.
    Empty,
    /// The fetch failed; the message is user-presentable.
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn rows(&self) -> &[T] {
        match self {
            ViewState::Loaded(page) => &page.data,
            _ => &[],
        }
    }

    pub fn total_count(&self) -> usize {
        match self {
            ViewState::Loaded(page) => page.total_count,
            _ => 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// "Not found" rendering: the result set is known to be empty.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ViewState::Empty)
    }
}

struct FetchOutcome<T> {
    generation: u64,
    result: FetchResult<Page<T>>,
}

/// Composition root of the orders table.
///
/// Single-threaded cooperative: all transitions happen on the caller's
/// task. Fetches run as spawned tasks reporting back over a channel with a
/// generation tag; dispatching a new query key cancels the in-flight fetch
/// and bumps the generation, so a late resolution of a superseded fetch is
/// dropped (last request wins). Dropping the presenter cancels any
/// in-flight fetch through the same signal.
pub struct TablePresenter<F: PageFetcher> {
    fetcher: Arc<F>,
    endpoint: String,
    pagination: PaginationState,
    selection: SelectionModel,
    search: Debounced<String>,
    view: ViewState<F::Item>,
    current_key: Option<QueryKey>,
    generation: u64,
    in_flight: Option<CancelHandle>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome<F::Item>>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome<F::Item>>,
}

impl<F> TablePresenter<F>
where
    F: PageFetcher + 'static,
    F::Item: TableRow + Send + 'static,
{
    /// Creates an idle presenter. Call [`refresh`](Self::refresh) to issue
    /// the first fetch.
    pub fn new(fetcher: Arc<F>, endpoint: impl Into<String>, debounce_delay: Duration) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            endpoint: endpoint.into(),
            pagination: PaginationState::default(),
            selection: SelectionModel::new(),
            search: Debounced::new(String::new(), debounce_delay),
            view: ViewState::Loading,
            current_key: None,
            generation: 0,
            in_flight: None,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn view(&self) -> &ViewState<F::Item> {
        &self.view
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Whether a fetch is currently in flight. May be true while an Empty
    /// or Loaded view is still rendered (refetch with an unchanged key).
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Padding rows keeping the table height stable on the last page.
    pub fn empty_rows(&self) -> usize {
        match &self.view {
            ViewState::Loaded(page) => self.pagination.empty_rows(page.total_count),
            _ => 0,
        }
    }

    /// Replaces the search text. The query key is unaffected until the
    /// debounce window elapses; drive that with
    /// [`settle_search`](Self::settle_search).
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.pagination.set_search(text.clone());
        self.search.write(text);
    }

    /// Waits out the debounce window of a pending search edit, commits the
    /// value and refreshes. Returns immediately when nothing is pending.
    pub async fn settle_search(&mut self) {
        if self.search.settle().await.is_some() {
            self.refresh();
        }
    }

    /// Commits a pending search edit if its window has already elapsed.
    pub fn poll_search(&mut self) {
        if self
            .search
            .poll_settle(tokio::time::Instant::now())
            .is_some()
        {
            self.refresh();
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
        self.refresh();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
        self.refresh();
    }

    /// Derives the query key from current state and fetches if it changed.
    ///
    /// A changed key supersedes the in-flight fetch, clears the selection
    /// (the displayed row set is about to change) and re-enters Loading.
    /// An unchanged key is the dedup/cache hit: the current view stands and
    /// no request is issued.
    pub fn refresh(&mut self) {
        let key = QueryKey::for_page(&self.endpoint, &self.pagination, self.search.settled());

        if self.current_key.as_ref() == Some(&key) {
            return;
        }

        self.selection.clear();
        self.view = ViewState::Loading;
        self.current_key = Some(key.clone());
        self.spawn_fetch(key);
    }

    /// Re-issues the current request without touching the rendered view,
    /// so an Empty table stays "not found" while the refetch is in flight.
    pub fn refetch(&mut self) {
        match self.current_key.clone() {
            Some(key) => self.spawn_fetch(key),
            None => self.refresh(),
        }
    }

    fn spawn_fetch(&mut self, key: QueryKey) {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }

        self.generation += 1;
        let generation = self.generation;

        let (handle, signal) = cancel_channel();
        self.in_flight = Some(handle);

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_page(&key, signal).await;
            let _ = tx.send(FetchOutcome { generation, result });
        });
    }

    /// Waits for the next fetch outcome and applies it. Returns `true` if
    /// the view changed, `false` if the outcome was stale and dropped.
    pub async fn process_next(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some(outcome) => self.apply(outcome),
            // Unreachable while `self.outcome_tx` is alive.
            None => false,
        }
    }

    /// Applies any already-delivered outcomes without waiting. Returns
    /// `true` if the view changed.
    pub fn try_process(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            changed |= self.apply(outcome);
        }
        changed
    }

    fn apply(&mut self, outcome: FetchOutcome<F::Item>) -> bool {
        if outcome.generation != self.generation {
            debug!(
                "dropping stale fetch result (generation {} < {})",
                outcome.generation, self.generation
            );
            return false;
        }

        self.in_flight = None;
        match outcome.result {
            Ok(page) if page.total_count == 0 => self.view = ViewState::Empty,
            Ok(page) => self.view = ViewState::Loaded(page),
            // A cancelled current-generation fetch happens only on teardown
            // paths; the view it would have replaced stays valid.
            Err(FetchError::Cancelled) => return false,
            Err(err) => self.view = ViewState::Failed(err.to_string()),
        }
        true
    }

    /// Select-all checkbox: toggles over the ids of the visible rows.
    pub fn select_all(&mut self) {
        let ids: Vec<String> = self
            .view
            .rows()
            .iter()
            .filter_map(|row| row.row_id().map(str::to_string))
            .collect();
        self.selection.select_all(ids);
    }

    /// Row checkbox: toggles one id.
    pub fn toggle_row(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    pub fn is_row_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Row click outside the checkbox: navigates to the detail view.
    /// Rows without an id are ignored.
    pub fn open_row(&self, nav: &mut impl Navigator, row: &F::Item) {
        let id = row.row_id().and_then(|id| OrderId::new(id).ok());
        view_detail(nav, id.as_ref());
    }
}

/// Flat display projection of one order row, ready for a table widget.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderRow {
    pub id: Option<String>,
    pub owner_name: String,
    pub owner_phone: String,
    pub driver_name: String,
    pub driver_phone: String,
    pub shipping_address: String,
    pub status: &'static str,
    pub selected: bool,
}

impl OrderRow {
    pub fn project(order: &Order, selection: &SelectionModel) -> Self {
        let (owner_name, owner_phone) = match &order.owner {
            Some(contact) => (contact.name.clone(), contact.display_phone()),
            None => (String::new(), String::new()),
        };
        let (driver_name, driver_phone) = match &order.driver {
            Some(contact) => (contact.name.clone(), contact.display_phone()),
            None => (String::new(), String::new()),
        };

        Self {
            id: order.id.as_deref().map(str::to_string),
            owner_name,
            owner_phone,
            driver_name,
            driver_phone,
            shipping_address: order.shipping_address.clone(),
            status: order.current_order_status.label(),
            selected: order
                .id
                .as_deref()
                .is_some_and(|id| selection.is_selected(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Contact, OrderStatus};

    fn order(id: Option<&str>) -> Order {
        Order {
            id: id.map(|id| id.try_into().unwrap()),
            owner: Some(Contact {
                name: "Alice".to_string(),
                phone_contact: "+16502530000".to_string(),
            }),
            driver: None,
            shipping_address: "1 Main St".to_string(),
            current_order_status: OrderStatus::Delivering,
            created_at: None,
        }
    }

    #[test]
    fn projection_flattens_contacts_and_marks_selection() {
        let mut selection = SelectionModel::new();
        selection.toggle("a");

        let row = OrderRow::project(&order(Some("a")), &selection);
        assert!(row.selected);
        assert_eq!(row.owner_name, "Alice");
        assert_eq!(row.owner_phone, "+16502530000");
        assert_eq!(row.driver_name, "");
        assert_eq!(row.status, "Delivering");
    }

    #[test]
    fn projection_of_id_less_row_is_never_selected() {
        let mut selection = SelectionModel::new();
        selection.toggle("a");

        let row = OrderRow::project(&order(None), &selection);
        assert_eq!(row.id, None);
        assert!(!row.selected);
    }

    #[test]
    fn view_state_rows_are_empty_outside_loaded() {
        let view: ViewState<Order> = ViewState::Empty;
        assert!(view.rows().is_empty());
        assert!(view.is_not_found());
        assert!(!view.is_loading());
    }
}
