//! Project store: the client's cache of server state for one project.
//!
//! [`ProjectStore`] is created once at startup with an [`ApiClient`] and
//! shared as `Arc<ProjectStore>`. It holds the project list, the selected
//! project and that project's script tree, events and asset items, plus
//! the client-only scene/shot selection.
//!
//! Every selection bumps a generation counter. Fetches remember the
//! generation they were issued under and their results are dropped if a
//! newer selection (or [`ProjectStore::shutdown`]) happened meanwhile, so a
//! slow response for an old project never overwrites a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use shotboard_client::{ApiClient, ApiResult};
use shotboard_core::models::script::find_shot_mut;
use shotboard_core::models::{
    AssetItem, Episode, Event, Project, Shot, UpdateShot, PERSONA_CATEGORY,
};
use shotboard_core::types::DbId;
use tokio::sync::{broadcast, RwLock};

use crate::changes::{StoreChange, CHANGE_CHANNEL_CAPACITY};

/// Cached server state plus client-only selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectState {
    pub projects: Vec<Project>,
    pub current_project_id: Option<DbId>,
    /// Script tree of the current project.
    pub episodes: Vec<Episode>,
    pub events: Vec<Event>,
    pub asset_items: Vec<AssetItem>,
    /// Client-only; never sent to the server.
    pub current_scene: Option<DbId>,
    /// Client-only; never sent to the server.
    pub current_shot: Option<DbId>,
}

impl ProjectState {
    pub fn current_project(&self) -> Option<&Project> {
        let id = self.current_project_id?;
        self.projects.iter().find(|p| p.id == id)
    }
}

/// The selection a fetch was issued for.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    project_id: DbId,
    generation: u64,
}

pub struct ProjectStore {
    api: Arc<ApiClient>,
    state: RwLock<ProjectState>,
    /// Only bumped while holding the `state` write lock.
    generation: AtomicU64,
    changes: broadcast::Sender<StoreChange>,
}

impl ProjectStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            api,
            state: RwLock::new(ProjectState::default()),
            generation: AtomicU64::new(0),
            changes,
        }
    }

    /// The client this store fetches through, for mutations the store
    /// does not wrap. Callers refetch the affected collection afterwards.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Subscribe to state change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    /// A copy of the whole state.
    pub async fn snapshot(&self) -> ProjectState {
        self.state.read().await.clone()
    }

    /// Borrow the state for the duration of `f`.
    pub async fn read<R>(&self, f: impl FnOnce(&ProjectState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    pub async fn current_project_id(&self) -> Option<DbId> {
        self.state.read().await.current_project_id
    }

    /// Current selection generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    // ---- actions ----

    /// Load the project list. If nothing is selected yet, select the first
    /// project in list order and wait for its data.
    pub async fn init(&self) -> ApiResult<()> {
        let projects = self.api.list_projects().await?;
        let count = projects.len();

        let ticket = {
            let mut state = self.state.write().await;
            state.projects = projects;
            match (state.current_project_id, state.projects.first().map(|p| p.id)) {
                (None, Some(first)) => Some(self.begin_selection(&mut state, first)),
                _ => None,
            }
        };

        tracing::info!(count, "Projects loaded");
        self.publish(StoreChange::ProjectsLoaded { count });

        if let Some(ticket) = ticket {
            self.announce_selection(ticket);
            self.load_selection(ticket).await?;
        }
        Ok(())
    }

    /// Make `project_id` current and load its script tree, events and
    /// persona asset items concurrently.
    ///
    /// The id is set and the scene/shot selection cleared before any
    /// request is sent. If one fetch fails the error is returned at once;
    /// fetches that already completed stay applied and the failed
    /// collection keeps its previous contents. Sibling fetches still in
    /// flight are cancelled, so their collections also keep the previous
    /// project's data until the next successful fetch.
    pub async fn select_project(&self, project_id: DbId) -> ApiResult<()> {
        let ticket = {
            let mut state = self.state.write().await;
            self.begin_selection(&mut state, project_id)
        };
        self.announce_selection(ticket);
        self.load_selection(ticket).await
    }

    /// Refetch the current project's script tree. No-op without a selection.
    pub async fn fetch_script(&self) -> ApiResult<()> {
        match self.current_ticket().await {
            Some(ticket) => self.load_script(ticket).await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// Refetch the current project's events. No-op without a selection.
    pub async fn fetch_events(&self) -> ApiResult<()> {
        match self.current_ticket().await {
            Some(ticket) => self.load_events(ticket).await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// Refetch the current project's asset items, optionally for one
    /// category only. No-op without a selection.
    pub async fn fetch_asset_items(&self, category: Option<&str>) -> ApiResult<()> {
        match self.current_ticket().await {
            Some(ticket) => self.load_asset_items(ticket, category).await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// Patch a shot on the server, then merge the patched fields into the
    /// cached copy in place.
    ///
    /// A shot missing from the cached tree is not an error: the merge is
    /// skipped and nothing is refetched.
    pub async fn save_shot(&self, shot_id: DbId, changes: &UpdateShot) -> ApiResult<Shot> {
        let saved = self.api.update_shot(shot_id, changes).await?;

        let merged = {
            let mut state = self.state.write().await;
            match find_shot_mut(&mut state.episodes, shot_id) {
                Some(shot) => {
                    changes.apply_to(shot);
                    true
                }
                None => false,
            }
        };

        if !merged {
            tracing::debug!(shot_id, "Saved shot is not in the cached script tree");
        }
        self.publish(StoreChange::ShotSaved { shot_id, merged });
        Ok(saved)
    }

    pub async fn select_scene(&self, scene_id: Option<DbId>) {
        let change = {
            let mut state = self.state.write().await;
            state.current_scene = scene_id;
            selection_change(&state)
        };
        self.publish(change);
    }

    pub async fn select_shot(&self, shot_id: Option<DbId>) {
        let change = {
            let mut state = self.state.write().await;
            state.current_shot = shot_id;
            selection_change(&state)
        };
        self.publish(change);
    }

    /// Drop all cached state. Fetches still in flight are discarded when
    /// they complete.
    pub async fn shutdown(&self) {
        {
            let mut state = self.state.write().await;
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = ProjectState::default();
        }
        tracing::info!("Project store shut down");
        self.publish(StoreChange::Cleared);
    }

    // ---- private helpers ----

    /// Start a new selection. Must be called with the write lock held.
    fn begin_selection(&self, state: &mut ProjectState, project_id: DbId) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        state.current_project_id = Some(project_id);
        state.current_scene = None;
        state.current_shot = None;
        Ticket {
            project_id,
            generation,
        }
    }

    fn announce_selection(&self, ticket: Ticket) {
        tracing::info!(
            project_id = ticket.project_id,
            generation = ticket.generation,
            "Project selected",
        );
        self.publish(StoreChange::ProjectSelected {
            project_id: ticket.project_id,
            generation: ticket.generation,
        });
    }

    async fn load_selection(&self, ticket: Ticket) -> ApiResult<()> {
        futures::try_join!(
            self.load_script(ticket),
            self.load_events(ticket),
            self.load_asset_items(ticket, Some(PERSONA_CATEGORY)),
        )?;
        Ok(())
    }

    async fn current_ticket(&self) -> Option<Ticket> {
        let state = self.state.read().await;
        state.current_project_id.map(|project_id| Ticket {
            project_id,
            generation: self.generation(),
        })
    }

    async fn load_script(&self, ticket: Ticket) -> ApiResult<bool> {
        let episodes = self.api.get_script(ticket.project_id).await?;
        let applied = self
            .apply_if_current(ticket, "script", |state| state.episodes = episodes)
            .await;
        if applied {
            self.publish(StoreChange::ScriptLoaded {
                project_id: ticket.project_id,
            });
        }
        Ok(applied)
    }

    async fn load_events(&self, ticket: Ticket) -> ApiResult<bool> {
        let events = self.api.get_events(ticket.project_id).await?;
        let applied = self
            .apply_if_current(ticket, "events", |state| state.events = events)
            .await;
        if applied {
            self.publish(StoreChange::EventsLoaded {
                project_id: ticket.project_id,
            });
        }
        Ok(applied)
    }

    async fn load_asset_items(&self, ticket: Ticket, category: Option<&str>) -> ApiResult<bool> {
        let items = self.api.get_asset_items(ticket.project_id, category).await?;
        let applied = self
            .apply_if_current(ticket, "asset_items", |state| state.asset_items = items)
            .await;
        if applied {
            self.publish(StoreChange::AssetItemsLoaded {
                project_id: ticket.project_id,
                category: category.map(str::to_string),
            });
        }
        Ok(applied)
    }

    /// Apply a fetch result unless the selection it was issued for has
    /// been superseded. Returns whether it was applied.
    async fn apply_if_current(
        &self,
        ticket: Ticket,
        what: &'static str,
        apply: impl FnOnce(&mut ProjectState),
    ) -> bool {
        let mut state = self.state.write().await;
        if self.generation() != ticket.generation {
            tracing::debug!(
                project_id = ticket.project_id,
                generation = ticket.generation,
                what,
                "Discarding stale fetch result",
            );
            return false;
        }
        apply(&mut state);
        true
    }

    fn publish(&self, change: StoreChange) {
        // Ignore the SendError: it only means there are zero receivers.
        let _ = self.changes.send(change);
    }
}

fn selection_change(state: &ProjectState) -> StoreChange {
    StoreChange::SelectionChanged {
        scene_id: state.current_scene,
        shot_id: state.current_shot,
    }
}
