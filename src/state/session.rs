use std::path::Path;
use tracing::{error, info, warn};

use super::data::SelfieRecord;
use super::store::ListStore;
use crate::photo::capture::timestamp_now;
use crate::photo::thumbnail::decode_thumbnail;

/// One run of the selfie list, from window open to window close.
///
/// The session owns the in-memory list. Persistence errors are logged here
/// and never passed up: losing the list file must not take the window down.
#[derive(Debug)]
pub struct Session {
    store: ListStore,
    records: Vec<SelfieRecord>,
}

impl Session {
    pub fn new(store: ListStore) -> Self {
        Self {
            store,
            records: Vec::new(),
        }
    }

    /// Load the saved list, but only into an empty session
    pub fn start(&mut self) {
        if !self.records.is_empty() {
            return;
        }

        info!("Loading selfies from {}", self.store.path().display());
        if let Err(e) = self.store.load(&mut self.records) {
            error!("Failed to load selfie list, keeping {} read so far: {}", self.records.len(), e);
        }
    }

    /// Record a successful capture, stamped with the current time
    pub fn record_capture(&mut self, file_path: &Path) -> &SelfieRecord {
        self.record_capture_at(file_path, timestamp_now())
    }

    /// Record a capture with an explicit timestamp.
    /// The record is kept even if its photo can't be decoded.
    pub fn record_capture_at(&mut self, file_path: &Path, timestamp: String) -> &SelfieRecord {
        let file_path = file_path.to_string_lossy().into_owned();
        let thumbnail = decode_thumbnail(&file_path, self.store.thumbnail_size());
        if thumbnail.is_none() {
            warn!("New selfie {} has no thumbnail", file_path);
        }

        self.records.push(SelfieRecord::new(timestamp, file_path, thumbnail));
        &self.records[self.records.len() - 1]
    }

    /// Write the whole list out. Returns whether it worked; errors are logged.
    pub fn end(&self) -> bool {
        info!("Saving selfies");
        match self.store.save(&self.records) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save selfie list: {}", e);
                false
            }
        }
    }

    pub fn records(&self) -> &[SelfieRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SelfieRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
