// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Moods (`user_mood/{userId}/moods`)
//! - Journal entries (`user_journals/{userId}/entries`)

use crate::db::{collections, JournalStore, MoodStore};
use crate::error::{AppError, Result};
use crate::models::{JournalEntry, MoodEntry};
use async_trait::async_trait;
use futures_util::TryStreamExt;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Whether this is the offline mock.
    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    /// Client plus the per-user parent document path.
    ///
    /// `kind` picks the error variant, so reads surface as `Fetch`.
    fn user_scope(
        &self,
        parent_collection: &str,
        user_id: &str,
        kind: fn(String) -> AppError,
    ) -> Result<(&firestore::FirestoreDb, firestore::ParentPathBuilder)> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| kind("Database not connected (offline mode)".to_string()))?;
        let parent = client
            .parent_path(parent_collection, user_id)
            .map_err(|e| kind(format!("Invalid parent path: {}", e)))?;
        Ok((client, parent))
    }
}

#[async_trait]
impl MoodStore for FirestoreDb {
    /// Streams the whole subcollection.
    async fn all_moods(&self, user_id: &str) -> Result<Vec<MoodEntry>> {
        let (client, parent) =
            self.user_scope(collections::USER_MOOD, user_id, AppError::Fetch)?;
        client
            .fluent()
            .select()
            .from(collections::MOODS)
            .parent(&parent)
            .obj::<MoodEntry>()
            .stream_query_with_errors()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }

    async fn moods_on_date(&self, user_id: &str, date: &str) -> Result<Vec<MoodEntry>> {
        let (client, parent) =
            self.user_scope(collections::USER_MOOD, user_id, AppError::Fetch)?;
        client
            .fluent()
            .select()
            .from(collections::MOODS)
            .parent(&parent)
            .filter(|q| q.for_all([q.field("date").eq(date)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }

    async fn moods_between(
        &self,
        user_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<MoodEntry>> {
        let (client, parent) =
            self.user_scope(collections::USER_MOOD, user_id, AppError::Fetch)?;
        client
            .fluent()
            .select()
            .from(collections::MOODS)
            .parent(&parent)
            .filter(|q| {
                q.for_all([
                    q.field("timestamp").greater_than_or_equal(start),
                    q.field("timestamp").less_than(end),
                ])
            })
            .order_by([("timestamp", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }

    async fn latest_moods(&self, user_id: &str, limit: u32) -> Result<Vec<MoodEntry>> {
        let (client, parent) =
            self.user_scope(collections::USER_MOOD, user_id, AppError::Fetch)?;
        client
            .fluent()
            .select()
            .from(collections::MOODS)
            .parent(&parent)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }

    async fn add_mood(&self, user_id: &str, entry: &MoodEntry) -> Result<MoodEntry> {
        let (client, parent) =
            self.user_scope(collections::USER_MOOD, user_id, AppError::Database)?;
        let stored: MoodEntry = client
            .fluent()
            .insert()
            .into(collections::MOODS)
            .generate_document_id()
            .parent(&parent)
            .object(entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id, id = ?stored.id, "Mood document created");
        Ok(stored)
    }
}

#[async_trait]
impl JournalStore for FirestoreDb {
    async fn entries_since(&self, user_id: &str, since: &str) -> Result<Vec<JournalEntry>> {
        let (client, parent) =
            self.user_scope(collections::USER_JOURNALS, user_id, AppError::Fetch)?;
        client
            .fluent()
            .select()
            .from(collections::ENTRIES)
            .parent(&parent)
            .filter(|q| q.for_all([q.field("timestamp").greater_than_or_equal(since)]))
            .order_by([("timestamp", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }

    async fn latest_entries(&self, user_id: &str, limit: u32) -> Result<Vec<JournalEntry>> {
        let (client, parent) =
            self.user_scope(collections::USER_JOURNALS, user_id, AppError::Fetch)?;
        client
            .fluent()
            .select()
            .from(collections::ENTRIES)
            .parent(&parent)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }

    async fn add_entry(&self, user_id: &str, entry: &JournalEntry) -> Result<JournalEntry> {
        let (client, parent) =
            self.user_scope(collections::USER_JOURNALS, user_id, AppError::Database)?;
        let stored: JournalEntry = client
            .fluent()
            .insert()
            .into(collections::ENTRIES)
            .generate_document_id()
            .parent(&parent)
            .object(entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id, id = ?stored.id, "Journal entry created");
        Ok(stored)
    }
}
