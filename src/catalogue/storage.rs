//! Persistence port for the image catalogue.

use tracing::debug;

use super::image::CardImage;
use crate::core::error::StorageError;
use crate::leaderboard::JsonFileStorage;

/// Whole-collection persistence for image metadata.
pub trait ImageStorage {
    /// Read every stored entry. A missing source is an empty collection.
    fn load(&self) -> Result<Vec<CardImage>, StorageError>;

    /// Replace the stored collection.
    fn save(&mut self, images: &[CardImage]) -> Result<(), StorageError>;
}

impl ImageStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CardImage>, StorageError> {
        let images: Vec<CardImage> = self.read_array()?;
        debug!(path = %self.path().display(), count = images.len(), "loaded card images");
        Ok(images)
    }

    fn save(&mut self, images: &[CardImage]) -> Result<(), StorageError> {
        self.write_array(images)?;
        debug!(path = %self.path().display(), count = images.len(), "saved card images");
        Ok(())
    }
}
