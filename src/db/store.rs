use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::StorageError;

pub const USER_KEY: &str = "trip_planner_user";
pub const TRIPS_KEY: &str = "trip_planner_trips";

/// Current layout version written by [`save_record`].
pub const RECORD_VERSION: u32 = 1;

/// Flat key to JSON document store backing the session and trip records.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a key that does not exist is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Short name reported by the health check.
    fn backend(&self) -> &'static str;
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord<T> {
    Versioned(Envelope<T>),
    // written before records carried a version tag
    Legacy(T),
}

pub async fn load_record<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str::<StoredRecord<T>>(&raw) {
        Ok(StoredRecord::Versioned(envelope)) => {
            if envelope.version > RECORD_VERSION {
                return Err(StorageError::UnsupportedVersion {
                    found: envelope.version,
                    supported: RECORD_VERSION,
                });
            }
            Ok(Some(envelope.data))
        }
        Ok(StoredRecord::Legacy(value)) => {
            log::debug!("Read unversioned record under {}", key);
            Ok(Some(value))
        }
        // untagged enums swallow the real cause, so parse again for a useful error
        Err(_) => match serde_json::from_str::<Envelope<serde_json::Value>>(&raw) {
            Ok(envelope) if envelope.version > RECORD_VERSION => {
                Err(StorageError::UnsupportedVersion {
                    found: envelope.version,
                    supported: RECORD_VERSION,
                })
            }
            Ok(envelope) => Ok(Some(serde_json::from_value(envelope.data)?)),
            Err(_) => Ok(Some(serde_json::from_str(&raw)?)),
        },
    }
}

pub async fn save_record<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
{
    let content = serde_json::to_string(&EnvelopeRef {
        version: RECORD_VERSION,
        data: value,
    })?;
    store.set(key, &content).await
}
