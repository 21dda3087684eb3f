use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::ProgressUpdate;

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub data: Vec<SyncItem>,
}

/// One offline change. Only `progress` items are applied today.
#[derive(Debug, Deserialize)]
pub struct SyncItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
struct ProgressItem {
    path_id: Uuid,
    progress: i64,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    /// Number of items received, applied or not.
    pub synced: usize,
}

/// POST /api/sync/upload
///
/// Items for paths the caller does not own, malformed items, and unknown
/// types are skipped; the batch as a whole still succeeds.
pub async fn handle_upload(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SyncRequest>,
) -> Result<Json<SyncResponse>, AppError> {
    let now = Utc::now();

    for (index, item) in req.data.iter().enumerate() {
        if item.item_type != "progress" {
            debug!(index, item_type = %item.item_type, "Skipping sync item of unhandled type");
            continue;
        }
        let change: ProgressItem = match serde_json::from_value(item.data.clone()) {
            Ok(change) => change,
            Err(e) => {
                warn!(index, "Skipping malformed progress item: {e}");
                continue;
            }
        };
        let update = ProgressUpdate {
            progress: change.progress,
            completed_phases: None,
            at: now,
        };
        if !state
            .store
            .update_progress(change.path_id, user.user_id, update)
            .await?
        {
            debug!(index, path_id = %change.path_id, "Sync item names no path of this user");
        }
    }

    Ok(Json(SyncResponse {
        success: true,
        synced: req.data.len(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::TestApp;

    #[tokio::test]
    async fn test_progress_items_are_applied() {
        let app = TestApp::new();
        let (_, token) = app.register_student("s@example.com").await;
        let (_, path) = app
            .post(
                "/api/learning/create-path",
                Some(&token),
                json!({"subject": "Python"}),
            )
            .await;
        let id = path["id"].as_str().unwrap();

        let (status, body) = app
            .post(
                "/api/sync/upload",
                Some(&token),
                json!({"data": [
                    {"type": "progress", "data": {"path_id": id, "progress": 40}},
                    {"type": "note", "data": {"text": "hello"}},
                    {"type": "progress", "data": {"path_id": "not-a-uuid", "progress": 10}},
                    {"type": "progress", "data": {"path_id": uuid::Uuid::new_v4(), "progress": 90}}
                ]}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "synced": 4}));

        let paths = app.store.paths.lock().unwrap();
        assert_eq!(paths[0].progress, 40);
        assert!(paths[0].last_updated.is_some());
    }

    #[tokio::test]
    async fn test_sync_keeps_completed_phases_and_stamps_update() {
        let app = TestApp::new();
        let (_, token) = app.register_student("s@example.com").await;
        let (_, path) = app
            .post(
                "/api/learning/create-path",
                Some(&token),
                json!({"subject": "Python"}),
            )
            .await;
        let id = path["id"].as_str().unwrap();
        app.put(
            &format!("/api/learning/progress/{id}"),
            Some(&token),
            json!({"progress": 25, "completed_phases": [1]}),
        )
        .await;
        app.store.paths.lock().unwrap()[0].last_updated = None;

        app.post(
            "/api/sync/upload",
            Some(&token),
            json!({"data": [{"type": "progress", "data": {"path_id": id, "progress": 60}}]}),
        )
        .await;

        let paths = app.store.paths.lock().unwrap();
        assert_eq!(paths[0].progress, 60);
        assert_eq!(paths[0].completed_phases, vec![1]);
        assert!(paths[0].last_updated.is_some());
    }

    #[tokio::test]
    async fn test_other_users_paths_are_untouched() {
        let app = TestApp::new();
        let (_, owner) = app.register_student("owner@example.com").await;
        let (_, other) = app.register_student("other@example.com").await;
        let (_, path) = app
            .post(
                "/api/learning/create-path",
                Some(&owner),
                json!({"subject": "Python"}),
            )
            .await;

        let (_, body) = app
            .post(
                "/api/sync/upload",
                Some(&other),
                json!({"data": [{"type": "progress", "data": {"path_id": path["id"], "progress": 99}}]}),
            )
            .await;
        assert_eq!(body["synced"], 1);
        assert_eq!(app.store.paths.lock().unwrap()[0].progress, 0);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let app = TestApp::new();
        let (_, token) = app.register_student("s@example.com").await;
        let (_, body) = app.post("/api/sync/upload", Some(&token), json!({})).await;
        assert_eq!(body, json!({"success": true, "synced": 0}));
    }
}
