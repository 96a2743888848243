use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::data::SelfieRecord;
use super::error::{StoreError, StoreResult};
use crate::photo::thumbnail::decode_thumbnail;

/// The ListStore reads and writes the selfie list file.
///
/// The file holds two lines per selfie, timestamp then path, with no
/// header, count or escaping:
///
/// ```text
/// 20230101_120000
/// /home/me/Pictures/Selfie_20230101_120000_1.jpg
/// ```
pub struct ListStore {
    list_path: PathBuf,
    thumbnail_size: u32,
}

impl ListStore {
    /// Create a store for `<data_dir>/<file_name>`.
    /// Nothing is touched on disk until `load` or `save`.
    pub fn new(data_dir: &Path, file_name: &str, thumbnail_size: u32) -> Self {
        Self {
            list_path: data_dir.join(file_name),
            thumbnail_size,
        }
    }

    /// Get the path to the list file
    pub fn path(&self) -> &Path {
        &self.list_path
    }

    /// Edge of the box thumbnails are decoded into
    pub fn thumbnail_size(&self) -> u32 {
        self.thumbnail_size
    }

    /// Append every complete record in the list file to `records`, in file order.
    ///
    /// - A missing file is a first run: `Ok(0)`.
    /// - A trailing timestamp without its path line is dropped.
    /// - Any other read error aborts; records already appended stay in `records`.
    ///
    /// Loading into a non-empty vector duplicates entries. Callers guard this.
    pub fn load(&self, records: &mut Vec<SelfieRecord>) -> StoreResult<usize> {
        let file = match File::open(&self.list_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No selfie list at {}, starting empty", self.list_path.display());
                return Ok(0);
            }
            Err(e) => return Err(StoreError::io(&self.list_path, e)),
        };

        let mut lines = BufReader::new(file).lines();
        let mut loaded = 0;

        while let Some(timestamp) = lines.next() {
            let timestamp = timestamp.map_err(|e| StoreError::io(&self.list_path, e))?;

            let Some(file_path) = lines.next() else {
                debug!("Dropping incomplete trailing record {:?}", timestamp);
                break;
            };
            let file_path = file_path.map_err(|e| StoreError::io(&self.list_path, e))?;

            let thumbnail = decode_thumbnail(&file_path, self.thumbnail_size);
            records.push(SelfieRecord::new(timestamp, file_path, thumbnail));
            loaded += 1;
        }

        info!("📁 Loaded {} selfies from {}", loaded, self.list_path.display());
        Ok(loaded)
    }

    /// Overwrite the list file with `records`, two lines each.
    ///
    /// There is no rollback: a failure part-way leaves a truncated file,
    /// which `load` tolerates.
    pub fn save(&self, records: &[SelfieRecord]) -> StoreResult<()> {
        if let Some(parent) = self.list_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let file = File::create(&self.list_path).map_err(|e| StoreError::io(&self.list_path, e))?;
        let mut writer = BufWriter::new(file);

        for record in records {
            writeln!(writer, "{}", record).map_err(|e| StoreError::io(&self.list_path, e))?;
        }
        writer.flush().map_err(|e| StoreError::io(&self.list_path, e))?;

        info!("💾 Saved {} selfies to {}", records.len(), self.list_path.display());
        Ok(())
    }
}

impl std::fmt::Debug for ListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListStore")
            .field("list_path", &self.list_path)
            .finish()
    }
}
