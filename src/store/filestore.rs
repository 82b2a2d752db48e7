use super::Store;
use crate::error::TrackerError;
use crate::ranges::RangeSet;

use std::fs::{self, File, Permissions};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

pub const DEFAULT_CACHE_FILE: &str = "github_actions_ip_cache.json";

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> FileStore {
        FileStore { path: path.into() }
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Mode for a rewritten cache: whatever the existing file has, so an
    /// update never changes who can read it.
    fn permissions(&self) -> Option<Permissions> {
        match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => new_file_permissions(),
        }
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

impl Store for FileStore {
    fn load(&self) -> Result<RangeSet, TrackerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no cache at {}", self.path.display());
                return Ok(RangeSet::new());
            }
            Err(err) => return Err(TrackerError::io(&self.path, err)),
        };

        let mut ranges: RangeSet =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                TrackerError::Corrupt {
                    path: self.path.clone(),
                    source,
                }
            })?;
        ranges.prune();

        debug!(
            "loaded {} cached ranges from {}",
            ranges.entry_count(),
            self.path.display()
        );
        Ok(ranges)
    }

    /// Writes to a temporary file beside the cache and renames it into place,
    /// so a failed write leaves the previous cache intact.
    fn save(&self, ranges: &RangeSet) -> Result<(), TrackerError> {
        let dir = self.dir();
        let mut tmp = NamedTempFile::new_in(dir).map_err(|err| TrackerError::io(dir, err))?;
        // temp files are created owner-only
        if let Some(perms) = self.permissions() {
            tmp.as_file()
                .set_permissions(perms)
                .map_err(|err| TrackerError::io(tmp.path(), err))?;
        }

        serde_json::to_writer_pretty(&mut tmp, ranges)
            .map_err(|err| TrackerError::io(tmp.path(), err.into()))?;
        tmp.write_all(b"\n")
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|err| TrackerError::io(tmp.path(), err))?;

        tmp.persist(&self.path)
            .map_err(|err| TrackerError::io(&self.path, err.error))?;

        debug!(
            "saved {} ranges to {}",
            ranges.entry_count(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
