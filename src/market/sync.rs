//! Sync ledger: the last remote-mirror outcome per entity.
//!
//! Local state is committed before any remote write, so the ledger is where a
//! divergence between the two becomes visible.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Profiles,
    Products,
    Categories,
    Orders,
    ChatMessages,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::Products => "products",
            Table::Categories => "categories",
            Table::Orders => "orders",
            Table::ChatMessages => "chat_messages",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub struct EntityRef {
    pub table: Table,
    pub id: String,
}

impl EntityRef {
    pub fn new(table: Table, id: &str) -> Self {
        Self {
            table,
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SyncState {
    /// No table store is configured.
    LocalOnly,
    Synced { at: DateTime<Utc> },
    Failed { at: DateTime<Utc>, error: String },
}

impl SyncState {
    pub fn is_failed(&self) -> bool {
        matches!(self, SyncState::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SyncEntry {
    pub entity: EntityRef,
    pub sync: SyncState,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SyncReport {
    pub backend: String,
    pub tracked: usize,
    pub failed: Vec<SyncEntry>,
}

#[derive(Debug, Default)]
pub struct SyncLedger {
    entries: BTreeMap<EntityRef, SyncState>,
}

impl SyncLedger {
    pub fn record(&mut self, entity: EntityRef, state: SyncState) {
        self.entries.insert(entity, state);
    }

    pub fn get(&self, entity: &EntityRef) -> Option<&SyncState> {
        self.entries.get(entity)
    }

    pub fn report(&self, backend: &str) -> SyncReport {
        let failed = self
            .entries
            .iter()
            .filter(|(_, state)| state.is_failed())
            .map(|(entity, state)| SyncEntry {
                entity: entity.clone(),
                sync: state.clone(),
            })
            .collect();
        SyncReport {
            backend: backend.to_string(),
            tracked: self.entries.len(),
            failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_success_clears_failure() {
        let mut ledger = SyncLedger::default();
        let entity = EntityRef::new(Table::Products, "p1");
        ledger.record(
            entity.clone(),
            SyncState::Failed {
                at: Utc::now(),
                error: "timeout".into(),
            },
        );
        assert_eq!(ledger.report("rest").failed.len(), 1);

        ledger.record(entity.clone(), SyncState::Synced { at: Utc::now() });
        let report = ledger.report("rest");
        assert!(report.failed.is_empty());
        assert_eq!(report.tracked, 1);
    }
}
