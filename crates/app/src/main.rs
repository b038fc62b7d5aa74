//! `shotboard` -- headless storyboard client.
//!
//! Resolves a client route, loads the selected project from the
//! storyboard server and prints what that view would render.
//!
//! ```text
//! shotboard [ROUTE]        # ROUTE defaults to "/"
//! ```
//!
//! # Environment variables
//!
//! | Variable                         | Required | Default                 | Description                      |
//! |----------------------------------|----------|-------------------------|----------------------------------|
//! | `SHOTBOARD_API_URL`              | no       | `http://localhost:8000` | Storyboard server base URL       |
//! | `SHOTBOARD_REQUEST_TIMEOUT_SECS` | no       | --                      | Per-request timeout              |
//! | `SHOTBOARD_PROJECT_ID`           | no       | first project           | Project to open                  |

use std::sync::Arc;

use shotboard_app::{resolve, AppConfig, ProjectState, ProjectStore, View, ViewData};
use shotboard_client::ApiClient;
use shotboard_core::models::script::shot_count;
use shotboard_core::models::PERSONA_CATEGORY;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "shotboard=info,shotboard_app=info,shotboard_client=info";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let location = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let route = resolve(&location).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Cannot open route");
        std::process::exit(1);
    });

    let api = ApiClient::from_config(&config.client).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    tracing::info!(
        api_url = %api.base_url(),
        route = route.path,
        "Starting shotboard",
    );

    let store = Arc::new(ProjectStore::new(Arc::new(api)));

    // init() keeps an existing selection, so a configured project wins.
    let loaded = match config.initial_project_id {
        Some(project_id) => match store.select_project(project_id).await {
            Ok(()) => store.init().await,
            Err(e) => Err(e),
        },
        None => store.init().await,
    };
    if let Err(e) = loaded {
        tracing::error!(error = %e, "Failed to load project");
        store.shutdown().await;
        std::process::exit(1);
    }

    // Selection already loads persona items; other asset views need their own list.
    let category = route.view.asset_category();
    if route.view.data() == ViewData::AssetItems && category != Some(PERSONA_CATEGORY) {
        if let Err(e) = store.fetch_asset_items(category).await {
            tracing::warn!(error = %e, "Failed to load asset items");
        }
    }

    let state = store.snapshot().await;
    print_view(route.view, &state);

    store.shutdown().await;
}

fn print_view(view: View, state: &ProjectState) {
    let project = state
        .current_project()
        .map(|p| p.name.as_str())
        .unwrap_or("(no project)");
    println!("{} / {}", project, view.title());

    match view.data() {
        ViewData::Script => {
            println!(
                "{} episodes, {} shots",
                state.episodes.len(),
                shot_count(&state.episodes)
            );
            for episode in &state.episodes {
                println!("  [{}] {}", episode.order, episode.title);
                for scene in &episode.scenes {
                    let title = scene.title.as_deref().unwrap_or("untitled");
                    println!("    {} ({} shots)", title, scene.shots.len());
                }
            }
        }
        ViewData::Events => {
            println!("{} events", state.events.len());
            for event in &state.events {
                println!("  {} {} ({} nodes)", event.color, event.name, event.nodes.len());
            }
        }
        ViewData::AssetItems => {
            println!("{} asset items", state.asset_items.len());
            for item in &state.asset_items {
                let category = item.category.as_deref().unwrap_or("-");
                println!("  {} [{}] {} media", item.name, category, item.assets.len());
            }
        }
    }
}
