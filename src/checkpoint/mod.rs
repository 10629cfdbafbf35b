//! Checkpoint and resume functionality for stores.
//!
//! A checkpoint captures a store's current state, its dispatch history and
//! its dispatch counter. It does NOT include the reducer, middleware or
//! subscribers (not serializable); a resumed store gets those from its
//! builder.

use crate::core::{Action, DispatchHistory};
use crate::store::Store;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint<S> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// State of the store at capture time
    pub state: S,

    /// Dispatch history, if the store tracks one
    pub history: Option<DispatchHistory>,

    /// Successful reductions so far
    pub dispatch_count: u64,
}

impl<S> Checkpoint<S>
where
    S: Serialize + DeserializeOwned,
{
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let header: VersionHeader = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        header.check()?;
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Serialize to a compact binary form.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary form, rejecting unknown format versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let header: VersionHeader = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        header.check()?;
        bincode::deserialize(bytes).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

/// Leading `version` field of a checkpoint, read before the rest so that a
/// future layout is reported as a version mismatch.
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

impl VersionHeader {
    fn check(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Action,
{
    /// Capture the current state, history and dispatch counter.
    ///
    /// Dispatches from other threads wait until the capture is done, so the
    /// three parts always agree.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        self.with_dispatch_lock(|store| {
            let checkpoint = Checkpoint {
                version: CHECKPOINT_VERSION,
                id: Uuid::new_v4().to_string(),
                timestamp: Utc::now(),
                state: store.state().as_ref().clone(),
                history: store.history(),
                dispatch_count: store.dispatch_count(),
            };
            tracing::debug!(
                id = %checkpoint.id,
                dispatch_count = checkpoint.dispatch_count,
                "Checkpoint captured"
            );
            checkpoint
        })
    }
}
