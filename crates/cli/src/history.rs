// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded, persisted scan history with running totals.

use std::collections::VecDeque;

use serde::Serialize;

use crate::report::{ScanReport, round_tenth};
use crate::storage::{Storage, StorageError, load_or_default};

/// Storage key for the persisted history.
pub const HISTORY_KEY: &str = "allerscan_history";

/// Default number of reports kept.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Totals derived from the stored reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregates {
    /// Number of stored reports.
    pub total_scans: usize,
    /// Sum of warning counts.
    pub total_allergens_found: usize,
    /// Sum of processing times in seconds.
    pub total_scan_time: f64,
    /// Mean processing time in seconds (0 when empty).
    pub average_processing_time: f64,
}

impl Aggregates {
    /// Fold over `reports` from scratch.
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a ScanReport>,
    {
        let mut totals = reports.into_iter().fold(Self::default(), |mut acc, r| {
            acc.total_scans += 1;
            acc.total_allergens_found += r.warning_count();
            acc.total_scan_time += r.processing_time_seconds();
            acc
        });
        totals.total_scan_time = round_tenth(totals.total_scan_time);
        totals.average_processing_time = if totals.total_scans == 0 {
            0.0
        } else {
            totals.total_scan_time / totals.total_scans as f64
        };
        totals
    }
}

/// Reports newest first, capped at `max_entries`.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<ScanReport>,
    max_entries: usize,
    aggregates: Aggregates,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl HistoryStore {
    /// Create an empty history. A cap of zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
            aggregates: Aggregates::default(),
        }
    }

    /// Load from storage; missing or corrupt data yields an empty history.
    pub fn load(storage: &dyn Storage, max_entries: usize) -> Self {
        let history = load_or_default(
            storage,
            HISTORY_KEY,
            |raw| Self::from_json(raw, max_entries),
            || Self::new(max_entries),
        );
        tracing::debug!(
            "loaded {} history entries ({} warnings total)",
            history.len(),
            history.aggregates.total_allergens_found
        );
        history
    }

    /// Parse a JSON array of reports (newest first), truncating to the cap.
    pub fn from_json(json: &str, max_entries: usize) -> Result<Self, serde_json::Error> {
        let reports: Vec<ScanReport> = serde_json::from_str(json)?;
        let mut history = Self::new(max_entries);
        history.entries = reports.into_iter().take(history.max_entries).collect();
        history.recompute();
        Ok(history)
    }

    /// Serialize as a JSON array, newest first.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Insert `report` at the front, evict beyond the cap, and persist.
    ///
    /// The in-memory history is updated even if persisting fails.
    pub fn append(
        &mut self,
        report: ScanReport,
        storage: &mut dyn Storage,
    ) -> Result<(), StorageError> {
        self.entries.push_front(report);
        while self.entries.len() > self.max_entries {
            if let Some(evicted) = self.entries.pop_back() {
                tracing::debug!("evicted history entry {}", evicted.id());
            }
        }
        self.recompute();
        self.persist(storage)
    }

    /// Remove every entry and persist the empty history.
    pub fn clear(&mut self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        self.entries.clear();
        self.recompute();
        self.persist(storage)
    }

    /// Write the full sequence to storage.
    pub fn persist(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = self.to_json().map_err(|e| StorageError::Serialize {
            key: HISTORY_KEY.to_string(),
            message: e.to_string(),
        })?;
        storage.set(HISTORY_KEY, &json)
    }

    pub fn aggregates(&self) -> Aggregates {
        self.aggregates
    }

    /// Entries newest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &ScanReport> {
        self.entries.iter()
    }

    pub fn get(&self, id: i64) -> Option<&ScanReport> {
        self.entries.iter().find(|r| r.id() == id)
    }

    pub fn latest(&self) -> Option<&ScanReport> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn recompute(&mut self) {
        self.aggregates = Aggregates::from_reports(&self.entries);
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
