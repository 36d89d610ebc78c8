//! Enabled-type allowlist.
//!
//! Admins can switch diary types on and off from the settings page. Only
//! enabled types may be generated or requested; the catalog itself is shared
//! (cheap to clone) between the ID generator and the request reconciler.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::diary::DiaryType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryTypeEntry {
    pub diary_type: DiaryType,
    pub enabled: bool,
}

#[derive(Clone)]
pub struct DiaryTypeCatalog {
    enabled: Arc<RwLock<HashSet<DiaryType>>>,
}

impl DiaryTypeCatalog {
    /// Catalog with every known type enabled
    pub fn all_enabled() -> Self {
        Self::with_enabled(DiaryType::ALL)
    }

    pub fn with_enabled<I>(types: I) -> Self
    where
        I: IntoIterator<Item = DiaryType>,
    {
        Self {
            enabled: Arc::new(RwLock::new(types.into_iter().collect())),
        }
    }

    pub fn is_enabled(&self, diary_type: DiaryType) -> LedgerResult<bool> {
        let enabled = self.enabled.read().map_err(|e| LedgerError::Storage(e.to_string()))?;
        Ok(enabled.contains(&diary_type))
    }

    /// Parse a wire type name and check it against the allowlist
    pub fn require_enabled(&self, diary_type: &str) -> LedgerResult<DiaryType> {
        let parsed: DiaryType = diary_type.parse()?;
        if !self.is_enabled(parsed)? {
            return Err(LedgerError::InvalidType(diary_type.to_string()));
        }
        Ok(parsed)
    }

    pub fn set_enabled(&self, diary_type: DiaryType, enabled: bool) -> LedgerResult<DiaryTypeEntry> {
        let mut set = self.enabled.write().map_err(|e| LedgerError::Storage(e.to_string()))?;
        if enabled {
            set.insert(diary_type);
        } else {
            set.remove(&diary_type);
        }
        info!("Diary type {} enabled={}", diary_type, enabled);
        Ok(DiaryTypeEntry { diary_type, enabled })
    }

    /// Every known type with its flag, in catalog order
    pub fn list(&self) -> LedgerResult<Vec<DiaryTypeEntry>> {
        let set = self.enabled.read().map_err(|e| LedgerError::Storage(e.to_string()))?;
        Ok(DiaryType::ALL
            .into_iter()
            .map(|diary_type| DiaryTypeEntry {
                diary_type,
                enabled: set.contains(&diary_type),
            })
            .collect())
    }
}

impl Default for DiaryTypeCatalog {
    fn default() -> Self {
        Self::all_enabled()
    }
}
