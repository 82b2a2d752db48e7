pub mod filestore;

use std::path::Path;

use crate::error::TrackerError;
use crate::ranges::RangeSet;

pub use filestore::FileStore;

pub trait Store {
    // an empty set means nothing has been stored yet
    fn load(&self) -> Result<RangeSet, TrackerError>;
    fn save(&self, ranges: &RangeSet) -> Result<(), TrackerError>;
    fn location(&self) -> &Path;
}
