// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The scanning session.
//!
//! A [`Session`] owns the allergen set, the report on display, the history
//! and the storage backend. It is single-threaded: state lives in `Cell`
//! and `RefCell`, so an acquisition source that calls back into the session
//! sees the busy flag instead of starting a second scan.

use std::cell::{Cell, Ref, RefCell};
use std::time::Instant;

use chrono::{DateTime, Local};
use crossbeam_channel::Receiver;

use crate::acquire::AcquisitionSource;
use crate::allergen::{ALLERGENS_KEY, AllergenSet, AllergenTerm};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::event::{EventSink, Notification, SessionEvent};
use crate::history::{Aggregates, HistoryStore};
use crate::report::{ReportBuilder, ScanReport};
use crate::storage::{Storage, StorageError, load_or_default};

/// Result of a scan request.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The scan ran and produced a report.
    Completed(ScanReport),
    /// Another scan was in flight; nothing happened.
    Busy,
}

/// Clears the busy flag when dropped, including during unwinding.
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct Session {
    config: Config,
    storage: RefCell<Box<dyn Storage>>,
    allergens: RefCell<AllergenSet>,
    current: RefCell<Option<ScanReport>>,
    history: RefCell<HistoryStore>,
    busy: Cell<bool>,
    last_id: Cell<i64>,
    events: EventSink,
}

impl Session {
    /// Open a session, loading allergens and history from `storage`.
    ///
    /// Missing or corrupt stored values fall back to the configured
    /// defaults and an empty history.
    pub fn open(config: &Config, storage: Box<dyn Storage>) -> Self {
        let allergens = load_or_default(
            storage.as_ref(),
            ALLERGENS_KEY,
            AllergenSet::from_json,
            || config.default_allergens(),
        );
        let history = HistoryStore::load(storage.as_ref(), config.history.max_entries);
        let last_id = history.entries().map(ScanReport::id).max().unwrap_or(0);
        tracing::debug!(
            "session opened: {} allergen(s), {} history entries",
            allergens.len(),
            history.len()
        );

        Self {
            config: config.clone(),
            storage: RefCell::new(storage),
            allergens: RefCell::new(allergens),
            current: RefCell::new(None),
            history: RefCell::new(history),
            busy: Cell::new(false),
            last_id: Cell::new(last_id),
            events: EventSink::disconnected(),
        }
    }

    /// Start receiving events. Replaces any previous subscriber.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (sink, rx) = EventSink::channel();
        self.events = sink;
        rx
    }

    /// Acquire text from `source`, analyze it, display and record the
    /// report.
    ///
    /// Returns [`ScanOutcome::Busy`] without touching `source` if a scan is
    /// already running. On failure the displayed report and history are
    /// unchanged. A history write failure does not fail the scan; it is
    /// logged and sent as a warning notice.
    pub fn scan(&self, source: &mut dyn AcquisitionSource) -> Result<ScanOutcome> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("scan requested while busy, ignoring");
            return Ok(ScanOutcome::Busy);
        };

        tracing::debug!("scanning from {}", source.name());
        let acquired = source
            .acquire(&self.events)
            .map_err(|e| self.report_error(Error::from(e)))?;
        let started = Instant::now();

        self.events.progress("Analyzing allergens...", 90);
        let report = {
            let allergens = self.allergens.borrow();
            self.builder(&allergens)
                .confidence(acquired.confidence)
                .started(started)
                .build(&acquired.raw_text)
        }
        .map_err(|e| self.report_error(Error::from(e)))?;

        *self.current.borrow_mut() = Some(report.clone());
        let appended = {
            let mut storage = self.storage.borrow_mut();
            self.history
                .borrow_mut()
                .append(report.clone(), &mut **storage)
        };
        if let Err(e) = appended {
            self.storage_warning(e);
        }

        self.events.progress("Done", 100);
        self.events.notify(Notification::success(format!(
            "Scan complete: {} warning(s)",
            report.warning_count()
        )));
        Ok(ScanOutcome::Completed(report))
    }

    /// Add an allergen and rederive the displayed report.
    pub fn add_allergen(&self, raw: &str) -> Result<AllergenTerm> {
        let added = self
            .allergens
            .borrow_mut()
            .add(raw)
            .map_err(|e| self.report_error(Error::from(e)))?;
        self.events
            .notify(Notification::success(format!("Added allergen: {added}")));
        self.allergens_changed()?;
        Ok(added)
    }

    /// Remove an allergen and rederive the displayed report.
    ///
    /// Returns `None` if the term was not in the set.
    pub fn remove_allergen(&self, raw: &str) -> Result<Option<AllergenTerm>> {
        let removed = self.allergens.borrow_mut().remove(raw);
        let Some(removed) = removed else {
            return Ok(None);
        };
        self.events
            .notify(Notification::info(format!("Removed allergen: {removed}")));
        self.allergens_changed()?;
        Ok(Some(removed))
    }

    /// Restore the configured default allergens.
    pub fn reset_allergens(&self) -> Result<()> {
        *self.allergens.borrow_mut() = self.config.default_allergens();
        self.events
            .notify(Notification::info("Allergens reset to defaults"));
        self.allergens_changed()
    }

    /// Rebuild the displayed report against the current allergen set.
    ///
    /// Does not touch history. Returns `None` when nothing is displayed.
    pub fn rederive(&self) -> Result<Option<ScanReport>> {
        let Some(previous) = self.current.borrow().clone() else {
            return Ok(None);
        };
        let report = self.rederive_report(&previous)?;
        *self.current.borrow_mut() = Some(report.clone());
        Ok(Some(report))
    }

    /// Rebuild the history entry `id` against the current allergen set and
    /// display it. History is not modified.
    pub fn rederive_from(&self, id: i64) -> Result<ScanReport> {
        let previous = self
            .history
            .borrow()
            .get(id)
            .cloned()
            .ok_or(Error::NotFound(id))?;
        let report = self.rederive_report(&previous)?;
        *self.current.borrow_mut() = Some(report.clone());
        Ok(report)
    }

    /// Record the displayed report in history.
    ///
    /// A report already in history (same id) is not added twice.
    pub fn save_current(&self) -> Result<ScanReport> {
        let report = self
            .current
            .borrow()
            .clone()
            .ok_or_else(|| self.report_error(Error::NoCurrentReport))?;

        if self.history.borrow().get(report.id()).is_some() {
            self.events
                .notify(Notification::info("Results already in history"));
            return Ok(report);
        }

        let appended = {
            let mut storage = self.storage.borrow_mut();
            self.history
                .borrow_mut()
                .append(report.clone(), &mut **storage)
        };
        appended.map_err(|e| self.storage_warning(e))?;
        self.events
            .notify(Notification::success("Results saved to history!"));
        Ok(report)
    }

    /// Stop displaying the current report. History is unaffected.
    pub fn clear_current(&self) {
        if self.current.borrow_mut().take().is_some() {
            self.events.notify(Notification::info("Results cleared"));
        }
    }

    /// Remove every history entry.
    pub fn clear_history(&self) -> Result<()> {
        let cleared = {
            let mut storage = self.storage.borrow_mut();
            self.history.borrow_mut().clear(&mut **storage)
        };
        cleared.map_err(|e| self.storage_warning(e))?;
        self.events.notify(Notification::info("History cleared"));
        Ok(())
    }

    pub fn allergens(&self) -> AllergenSet {
        self.allergens.borrow().clone()
    }

    /// The report on display, if any.
    pub fn current(&self) -> Option<ScanReport> {
        self.current.borrow().clone()
    }

    /// Borrow the history for reading.
    ///
    /// The borrow must end before calling a method that records history.
    pub fn history(&self) -> Ref<'_, HistoryStore> {
        self.history.borrow()
    }

    pub fn aggregates(&self) -> Aggregates {
        self.history.borrow().aggregates()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn builder<'a>(&self, allergens: &'a AllergenSet) -> ReportBuilder<'a> {
        let created_at = Local::now();
        ReportBuilder::new(allergens)
            .style(self.config.highlight.clone())
            .min_text_chars(self.config.scan.min_text_chars)
            .created_at(created_at)
            .id(self.next_id(created_at))
    }

    fn rederive_report(&self, previous: &ScanReport) -> Result<ScanReport> {
        let allergens = self.allergens.borrow();
        let report = self
            .builder(&allergens)
            .rederive(previous)
            .map_err(|e| self.report_error(Error::from(e)))?;
        tracing::debug!("rederived scan {} as {}", previous.id(), report.id());
        Ok(report)
    }

    /// Persist the allergen set, then rederive the displayed report.
    fn allergens_changed(&self) -> Result<()> {
        let persisted = self.persist_allergens();
        if self.current.borrow().is_some() {
            self.rederive()?;
        }
        persisted.map_err(|e| self.storage_warning(e))
    }

    fn persist_allergens(&self) -> std::result::Result<(), StorageError> {
        let json = self
            .allergens
            .borrow()
            .to_json()
            .map_err(|e| StorageError::Serialize {
                key: ALLERGENS_KEY.to_string(),
                message: e.to_string(),
            })?;
        self.storage.borrow_mut().set(ALLERGENS_KEY, &json)
    }

    /// Creation time in milliseconds, bumped past the last id issued.
    fn next_id(&self, created_at: DateTime<Local>) -> i64 {
        let id = created_at
            .timestamp_millis()
            .max(self.last_id.get().saturating_add(1));
        self.last_id.set(id);
        id
    }

    fn report_error(&self, err: Error) -> Error {
        tracing::debug!("{}", err);
        self.events.notify(Notification::from(&err));
        err
    }

    fn storage_warning(&self, err: StorageError) -> Error {
        tracing::warn!("failed to persist session state: {}", err);
        let err = Error::from(err);
        self.events.notify(Notification::from(&err));
        err
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
