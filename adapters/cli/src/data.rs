//! JSON data set file backing the in-memory stores between invocations.

use std::{io, path::Path};

use anyhow::{Context, Result};
use seatmap_persistence::{DataSet, Persistence};
use tracing::{debug, info};

/// Seeds in-memory stores from the data set file, starting empty when it is absent.
pub(crate) async fn open(path: &Path) -> Result<Persistence> {
    let data = match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice::<DataSet>(&bytes)
            .with_context(|| format!("failed to parse data set at {}", path.display()))?,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no data set found, starting empty");
            DataSet::default()
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read data set at {}", path.display()));
        }
    };
    Ok(Persistence::from_data_set(data))
}

/// Writes every store back to the data set file.
pub(crate) async fn persist(persistence: &Persistence, path: &Path) -> Result<()> {
    let data = persistence
        .data_set()
        .await
        .context("failed to read back the stores")?;
    let json = serde_json::to_vec_pretty(&data).context("failed to serialise data set")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write data set at {}", path.display()))?;
    info!(
        path = %path.display(),
        seat_maps = data.seat_maps.len(),
        tickets = data.tickets.len(),
        "data set written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use seatmap_core::{LayoutSnapshot, SeatMapInfo};

    #[tokio::test]
    async fn missing_file_opens_empty_stores() {
        let dir = tempfile::tempdir().expect("temp dir");
        let persistence = open(&dir.path().join("data.json")).await.expect("opens");
        assert_eq!(
            persistence.data_set().await.expect("dumps"),
            DataSet::default()
        );
    }

    #[tokio::test]
    async fn persisted_maps_survive_reopening() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("data.json");

        let persistence = open(&path).await.expect("opens");
        let saved = persistence
            .save_layout(&LayoutSnapshot::empty(SeatMapInfo::new("Hall", Utc::now())))
            .await
            .expect("saves");
        persist(&persistence, &path).await.expect("persists");

        let reopened = open(&path).await.expect("reopens");
        let map = saved.map().expect("map id allocated");
        let loaded = reopened.load_layout(map).await.expect("loads");
        assert_eq!(loaded.map.name, "Hall");
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, b"{ not json").await.expect("writes");
        assert!(open(&path).await.is_err());
    }
}
