//! UI preferences and dashboard snapshots: the dark-mode flag, the cached
//! monthly series and the project-status figures. These are opaque scalars
//! and arrays with no cross-referencing.

use crate::report::MonthlyBucket;
use crate::store::{Store, DARK_MODE_KEY, MONTHLY_DATA_KEY, PROJECT_STATUS_KEY};
use crate::Result;
use serde::{Deserialize, Serialize};

/// One line of the project-status panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub name: String,
    pub value: u64,
}

/// The default project-status snapshot: every bucket present, all zero.
pub fn default_project_status() -> Vec<StatusCount> {
    ["Em Andamento", "Concluídos", "Em Pausa", "Cancelados"]
        .into_iter()
        .map(|name| StatusCount {
            name: name.to_string(),
            value: 0,
        })
        .collect()
}

/// Read/write access to the preference keys.
#[derive(Debug, Clone)]
pub struct Prefs {
    store: Store,
}

impl Prefs {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The persisted dark-mode flag, or `None` when the user has never set
    /// one (callers then follow the system preference).
    pub async fn dark_mode(&self) -> Option<bool> {
        self.store.read_json(DARK_MODE_KEY).await
    }

    pub async fn set_dark_mode(&self, dark: bool) -> Result<()> {
        self.store.write_json(DARK_MODE_KEY, &dark).await
    }

    /// The cached monthly series fed to the dashboard chart. Refreshed on
    /// every transaction mutation.
    pub async fn monthly_cache(&self) -> Option<Vec<MonthlyBucket>> {
        self.store.read_json(MONTHLY_DATA_KEY).await
    }

    pub async fn set_monthly_cache(&self, buckets: &[MonthlyBucket]) -> Result<()> {
        self.store.write_json(MONTHLY_DATA_KEY, &buckets).await
    }

    /// The project-status snapshot, falling back to the all-zero default.
    pub async fn project_status(&self) -> Vec<StatusCount> {
        self.store
            .read_json(PROJECT_STATUS_KEY)
            .await
            .unwrap_or_else(default_project_status)
    }

    pub async fn set_project_status(&self, status: &[StatusCount]) -> Result<()> {
        self.store.write_json(PROJECT_STATUS_KEY, &status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_dark_mode_unset_then_set() {
        let dir = TempDir::new().unwrap();
        let prefs = Prefs::new(Store::new(dir.path()));
        assert!(prefs.dark_mode().await.is_none());
        prefs.set_dark_mode(true).await.unwrap();
        assert_eq!(prefs.dark_mode().await, Some(true));
    }

    #[tokio::test]
    async fn test_project_status_defaults_to_zeroes() {
        let dir = TempDir::new().unwrap();
        let prefs = Prefs::new(Store::new(dir.path()));
        let status = prefs.project_status().await;
        assert_eq!(status.len(), 4);
        assert!(status.iter().all(|s| s.value == 0));
        assert_eq!(status[0].name, "Em Andamento");
    }

    #[tokio::test]
    async fn test_monthly_cache_round_trip() {
        let dir = TempDir::new().unwrap();
        let prefs = Prefs::new(Store::new(dir.path()));
        assert!(prefs.monthly_cache().await.is_none());
        let buckets = vec![MonthlyBucket {
            month: "2024-01".to_string(),
            ..Default::default()
        }];
        prefs.set_monthly_cache(&buckets).await.unwrap();
        assert_eq!(prefs.monthly_cache().await.unwrap(), buckets);
    }
}
