//! Remote module - workout logs to a Firestore-style document store

pub mod client;
pub mod value;

use reqwest::StatusCode;
use serde_json::Value as Json;
use thiserror::Error;
use tracing::info;

use crate::db::WorkoutLog;

pub use client::FirestoreClient;
pub use value::{Document, Fields, Value, from_fields, to_fields};

/// Collection used for uploaded logs
pub const LOGS_COLLECTION: &str = "workoutLogs";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Firestore project ID is not configured (set FIRESTORE_PROJECT_ID)")]
    MissingProjectId,
    #[error("failed to write to Firestore: {status}")]
    Http { status: StatusCode, body: Json },
    #[error("request to Firestore failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("record is not a JSON object")]
    NotAnObject,
}

/// Upload logs one by one, keyed by log id. Stops at the first failure.
pub async fn sync_logs(client: &FirestoreClient, token: &str, logs: &[WorkoutLog]) -> Result<usize, RemoteError> {
    let mut written = 0;
    for log in logs {
        let record = match serde_json::to_value(log) {
            Ok(Json::Object(map)) => map,
            _ => return Err(RemoteError::NotAnObject),
        };
        client.upsert(token, LOGS_COLLECTION, &record, Some(&log.id)).await?;
        written += 1;
    }

    info!("Synced {} workout logs", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::DayId;
    use client::tests::{direct_http, stub_server};
    use serde_json::json;

    fn log() -> WorkoutLog {
        WorkoutLog {
            id: "log-1".into(),
            date: "2026-10-16".parse().unwrap(),
            day: DayId::Back,
            exercise: "Plank Hold".into(),
            sets: 3,
            reps: 45,
            weight: 0.0,
            notes: None,
            created_at: "2026-10-16T08:00:00Z".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_sync_logs_uses_log_id() {
        let (base, captured) = stub_server(200, "{}").await;
        let client = FirestoreClient::new(Some("gym".into()))
            .with_base_url(base)
            .with_http_client(direct_http());

        let written = sync_logs(&client, "tok", &[log()]).await.unwrap();
        assert_eq!(written, 1);

        let captured = captured.await.unwrap();
        assert!(captured.head.contains("/documents/workoutLogs/log-1 "));
        let body: Json = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(body["fields"]["day"], json!({"stringValue": "back"}));
        assert_eq!(body["fields"]["reps"], json!({"integerValue": "45"}));
        assert_eq!(body["fields"]["createdAt"]["stringValue"], "2026-10-16T08:00:00Z");
    }

    #[tokio::test]
    async fn test_sync_nothing_without_project() {
        let client = FirestoreClient::new(None);
        assert!(matches!(
            sync_logs(&client, "tok", &[log()]).await,
            Err(RemoteError::MissingProjectId)
        ));
        assert_eq!(sync_logs(&client, "tok", &[]).await.unwrap(), 0);
    }
}
