//! Headless driver for the orders table: loads one page from the configured
//! backend and prints it, the way the dashboard shell would render it.

use std::env;
use std::process;

use dotenvy::dotenv;

use fleet_dashboard::auth::AuthState;
use fleet_dashboard::models::config::DashboardConfig;
use fleet_dashboard::pagination::PageLinks;
use fleet_dashboard::routes::{Resolution, resolve};
use fleet_dashboard::services::orders::orders_table;
use fleet_dashboard::table::{ORDER_TABLE_HEAD, OrderRow, ViewState};

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match DashboardConfig::load(&app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            process::exit(1);
        }
    };

    // No session provider outside the browser shell: treat the session as
    // resolved so the layout gate lets the orders view through.
    let auth = AuthState {
        is_authenticated: true,
        loading: false,
    };
    let route = match resolve("/dashboard/orders", &auth) {
        Resolution::View(route) => route,
        Resolution::Redirect(to) => {
            log::error!("Redirected to {} before rendering", to.path());
            process::exit(1);
        }
        Resolution::Progress => {
            log::error!("Auth state did not settle");
            process::exit(1);
        }
    };
    log::info!("Opening {}", route.path());

    let mut presenter = match orders_table(&config) {
        Ok(presenter) => presenter,
        Err(err) => {
            log::error!("Failed to build the orders table: {err}");
            process::exit(1);
        }
    };

    // Optional search term as the first argument.
    if let Some(search) = env::args().nth(1) {
        presenter.set_search(search);
        presenter.settle_search().await;
    }

    while presenter.is_fetching() {
        presenter.process_next().await;
    }

    match presenter.view() {
        ViewState::Loaded(page) => {
            println!("{}", ORDER_TABLE_HEAD[1..].join(" | "));
            for order in &page.data {
                let row = OrderRow::project(order, presenter.selection());
                println!(
                    "{} | {} | {} | {} | {} | {}",
                    row.owner_name,
                    row.owner_phone,
                    row.driver_name,
                    row.driver_phone,
                    row.shipping_address,
                    row.status,
                );
            }

            let links = PageLinks::new(presenter.pagination(), page.total_count);
            let pages: Vec<String> = links
                .pages
                .iter()
                .map(|page| match page {
                    Some(n) => n.to_string(),
                    None => "…".to_string(),
                })
                .collect();
            println!(
                "page {} of [{}], {} rows total",
                links.current,
                pages.join(" "),
                page.total_count
            );
        }
        ViewState::Empty => {
            println!("Not found");
            println!(
                "No results found for \"{}\". Try checking for typos or using complete words.",
                presenter.pagination().search
            );
        }
        ViewState::Failed(message) => {
            log::error!("Failed to load orders: {message}");
            process::exit(1);
        }
        ViewState::Loading => {
            log::error!("Fetch resolved without data");
            process::exit(1);
        }
    }
}
