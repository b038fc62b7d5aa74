//! REST API client for the storyboard server.
//!
//! Wraps every endpoint the client uses (projects, script tree, events,
//! asset items and media uploads) using [`reqwest`]. Each call maps to
//! exactly one HTTP request: no retries, no caching, and failures are
//! passed through as [`ApiError`] without translation.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shotboard_core::models::{
    Asset, AssetItem, CreateAssetItem, CreateEpisode, CreateEvent, CreateProject, CreateScene,
    CreateShot, Episode, Event, EventNode, Project, Scene, Shot, UpdateAssetItem, UpdateEvent,
    UpdateProject, UpdateScene, UpdateShot, UpsertEventNode, PERSONA_CATEGORY,
};
use shotboard_core::types::DbId;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::upload::FileUpload;

/// HTTP client for a single storyboard server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// Query string for `GET /projects/{id}/asset-items`. `None` omits the
/// parameter entirely.
#[derive(Serialize)]
struct CategoryQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
}

#[derive(Serialize)]
struct FilePathQuery<'a> {
    file_path: &'a str,
}

impl ApiClient {
    /// Create a client for the server at `base_url`, e.g.
    /// `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build a client from configuration, applying the optional timeout.
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config.api_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a stored media file, as referenced by [`Asset::file_path`]
    /// or [`Shot::video_path`], under the server's static `/files/` mount.
    pub fn file_url(&self, relative_path: &str) -> String {
        let path = relative_path.replace('\\', "/");
        let path = path.trim_start_matches('/');
        let path = path.strip_prefix("data/").unwrap_or(path);
        format!("{}/files/{}", self.base_url, path)
    }

    /// Check the server is up. Returns its status message.
    pub async fn health(&self) -> ApiResult<serde_json::Value> {
        self.get("/").await
    }

    // ---- projects ----

    pub async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        self.get("/projects/").await
    }

    pub async fn create_project(&self, project: &CreateProject) -> ApiResult<Project> {
        self.send_json(Method::POST, "/projects/", project).await
    }

    pub async fn update_project(&self, id: DbId, update: &UpdateProject) -> ApiResult<Project> {
        self.send_json(Method::PATCH, &format!("/projects/{id}"), update)
            .await
    }

    // ---- script tree ----

    /// Fetch the full episode -> scene -> shot tree for a project.
    pub async fn get_script(&self, project_id: DbId) -> ApiResult<Vec<Episode>> {
        self.get(&format!("/storyboard/project/{project_id}")).await
    }

    pub async fn create_episode(
        &self,
        project_id: DbId,
        episode: &CreateEpisode,
    ) -> ApiResult<Episode> {
        self.send_json(
            Method::POST,
            &format!("/storyboard/project/{project_id}/episode"),
            episode,
        )
        .await
    }

    pub async fn create_scene(&self, episode_id: DbId, scene: &CreateScene) -> ApiResult<Scene> {
        self.send_json(
            Method::POST,
            &format!("/storyboard/episode/{episode_id}/scene"),
            scene,
        )
        .await
    }

    pub async fn create_shot(&self, scene_id: DbId, shot: &CreateShot) -> ApiResult<Shot> {
        self.send_json(
            Method::POST,
            &format!("/storyboard/scene/{scene_id}/shot"),
            shot,
        )
        .await
    }

    pub async fn update_shot(&self, shot_id: DbId, update: &UpdateShot) -> ApiResult<Shot> {
        self.send_json(
            Method::PATCH,
            &format!("/storyboard/shot/{shot_id}"),
            update,
        )
        .await
    }

    pub async fn update_scene(&self, scene_id: DbId, update: &UpdateScene) -> ApiResult<Scene> {
        self.send_json(
            Method::PATCH,
            &format!("/storyboard/scene/{scene_id}"),
            update,
        )
        .await
    }

    /// Delete an episode together with its scenes and shots.
    pub async fn delete_episode(&self, id: DbId) -> ApiResult<()> {
        self.delete(&format!("/storyboard/episode/{id}")).await
    }

    /// Delete a scene together with its shots.
    pub async fn delete_scene(&self, id: DbId) -> ApiResult<()> {
        self.delete(&format!("/storyboard/scene/{id}")).await
    }

    pub async fn delete_shot(&self, id: DbId) -> ApiResult<()> {
        self.delete(&format!("/storyboard/shot/{id}")).await
    }

    // ---- shot media ----

    /// Register a file already on the server's disk as an asset of a shot.
    pub async fn add_asset(&self, shot_id: DbId, file_path: &str) -> ApiResult<Asset> {
        let url = self.url(&format!("/assets/shot/{shot_id}"));
        tracing::debug!(method = "POST", url = %url, "API request");
        let response = self
            .client
            .post(url)
            .query(&FilePathQuery { file_path })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn upload_shot_asset(&self, shot_id: DbId, upload: FileUpload) -> ApiResult<Asset> {
        self.send_multipart(&format!("/assets/shot/{shot_id}/upload"), upload)
            .await
    }

    /// Upload the rendered video for a shot. Returns the shot with its new
    /// `video_path`.
    pub async fn upload_shot_video(&self, shot_id: DbId, upload: FileUpload) -> ApiResult<Shot> {
        self.send_multipart(&format!("/assets/shot/{shot_id}/video"), upload)
            .await
    }

    /// Delete one media record and its stored file.
    pub async fn delete_asset(&self, asset_id: DbId) -> ApiResult<()> {
        self.delete(&format!("/projects/assets/{asset_id}")).await
    }

    // ---- events ----

    pub async fn get_events(&self, project_id: DbId) -> ApiResult<Vec<Event>> {
        self.get(&format!("/events/project/{project_id}")).await
    }

    pub async fn create_event(&self, project_id: DbId, event: &CreateEvent) -> ApiResult<Event> {
        self.send_json(
            Method::POST,
            &format!("/events/project/{project_id}"),
            event,
        )
        .await
    }

    pub async fn update_event(&self, event_id: DbId, update: &UpdateEvent) -> ApiResult<Event> {
        self.send_json(Method::PATCH, &format!("/events/{event_id}"), update)
            .await
    }

    /// Create or replace the node of an event for one script-tree target.
    pub async fn upsert_event_node(
        &self,
        event_id: DbId,
        node: &UpsertEventNode,
    ) -> ApiResult<EventNode> {
        self.send_json(Method::POST, &format!("/events/nodes/{event_id}"), node)
            .await
    }

    // ---- asset items ----

    /// List a project's asset items, optionally restricted to one category.
    pub async fn get_asset_items(
        &self,
        project_id: DbId,
        category: Option<&str>,
    ) -> ApiResult<Vec<AssetItem>> {
        let url = self.url(&format!("/projects/{project_id}/asset-items"));
        tracing::debug!(method = "GET", url = %url, category = ?category, "API request");
        let response = self
            .client
            .get(url)
            .query(&CategoryQuery { category })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn create_asset_item(
        &self,
        project_id: DbId,
        item: &CreateAssetItem,
    ) -> ApiResult<AssetItem> {
        self.send_json(
            Method::POST,
            &format!("/projects/{project_id}/asset-items"),
            item,
        )
        .await
    }

    pub async fn update_asset_item(
        &self,
        item_id: DbId,
        update: &UpdateAssetItem,
    ) -> ApiResult<AssetItem> {
        self.send_json(
            Method::PATCH,
            &format!("/projects/asset-items/{item_id}"),
            update,
        )
        .await
    }

    pub async fn delete_asset_item(&self, item_id: DbId) -> ApiResult<()> {
        self.delete(&format!("/projects/asset-items/{item_id}"))
            .await
    }

    pub async fn upload_asset_item_media(
        &self,
        item_id: DbId,
        upload: FileUpload,
    ) -> ApiResult<Asset> {
        self.send_multipart(&format!("/assets/asset-item/{item_id}"), upload)
            .await
    }

    // ---- legacy names ----

    #[deprecated(note = "use `get_asset_items` with the persona category")]
    pub async fn get_characters(&self, project_id: DbId) -> ApiResult<Vec<AssetItem>> {
        self.get_asset_items(project_id, Some(PERSONA_CATEGORY))
            .await
    }

    #[deprecated(note = "use `upload_asset_item_media`")]
    pub async fn upload_character_asset(
        &self,
        item_id: DbId,
        upload: FileUpload,
    ) -> ApiResult<Asset> {
        self.upload_asset_item_media(item_id, upload).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(method = "GET", url = %url, "API request");
        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "API request");
        let response = self.client.request(method, url).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        upload: FileUpload,
    ) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(
            method = "POST",
            url = %url,
            file_name = %upload.file_name,
            size = upload.bytes.len(),
            "API upload",
        );
        let form = upload.into_form()?;
        let response = self.client.post(url).multipart(form).send().await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        tracing::debug!(method = "DELETE", url = %url, "API request");
        let response = self.client.delete(url).send().await?;
        Self::check_status(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> ApiResult<()> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = ApiClient::new("http://localhost:8000/");
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/projects/"), "http://localhost:8000/projects/");
    }

    #[test]
    fn file_url_normalises_stored_paths() {
        let api = ApiClient::new("http://localhost:8000");
        assert_eq!(
            api.file_url("Demo/characters/hero.png"),
            "http://localhost:8000/files/Demo/characters/hero.png"
        );
        assert_eq!(
            api.file_url("data\\Demo\\storyBoards\\videos\\a.mp4"),
            "http://localhost:8000/files/Demo/storyBoards/videos/a.mp4"
        );
    }

    #[test]
    fn from_config_uses_configured_url() {
        let config = ClientConfig {
            api_url: "http://10.0.0.5:8000".into(),
            request_timeout: Some(std::time::Duration::from_secs(3)),
        };
        let api = ApiClient::from_config(&config).unwrap();
        assert_eq!(api.base_url(), "http://10.0.0.5:8000");
    }
}
