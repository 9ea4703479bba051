//! The image catalogue and its repository interface.
//!
//! ## Failure policy
//!
//! Like the leaderboard, metadata load and save failures are logged at
//! `warn` and never escape; the in-memory list stays authoritative. Only
//! `add_image` reports errors, because the caller must know whether the
//! image file itself was written.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::image::CardImage;
use super::storage::ImageStorage;
use crate::core::error::CatalogueError;

/// What callers need from an image store.
pub trait CardImageRepository {
    /// Every registered image, in insertion order.
    fn all_images(&self) -> Vec<CardImage>;

    /// The image with `id`, if registered.
    fn image(&self, id: &str) -> Option<CardImage>;

    /// Register `image`, replacing any entry with the same id.
    fn save_image(&mut self, image: CardImage);

    /// Unregister the image with `id` and delete its file. Unknown ids are
    /// a no-op.
    fn delete_image(&mut self, id: &str) -> Option<CardImage>;
}

/// Image metadata over a storage port, plus the directory holding the files.
#[derive(Debug)]
pub struct ImageCatalogue<S: ImageStorage> {
    images: Vec<CardImage>,
    image_dir: PathBuf,
    storage: S,
}

impl<S: ImageStorage> ImageCatalogue<S> {
    /// Open a catalogue, creating `image_dir` when missing.
    pub fn open(storage: S, image_dir: impl Into<PathBuf>) -> Result<Self, CatalogueError> {
        let image_dir = image_dir.into();
        fs::create_dir_all(&image_dir)?;

        let images = match storage.load() {
            Ok(images) => images,
            Err(err) => {
                warn!(error = %err, "failed to load card images, starting with an empty catalogue");
                Vec::new()
            }
        };

        Ok(Self {
            images,
            image_dir,
            storage,
        })
    }

    #[must_use]
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Copy `source` into the image directory and register it under `name`.
    ///
    /// The file is named `<id>.<extension>`; a leading dot on `extension`
    /// is accepted.
    pub fn add_image(
        &mut self,
        name: &str,
        source: &mut impl Read,
        extension: &str,
    ) -> Result<CardImage, CatalogueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogueError::InvalidName(name.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        let extension = extension.trim_start_matches('.');
        let file_name = if extension.is_empty() {
            id.clone()
        } else {
            format!("{}.{}", id, extension)
        };
        let path = self.image_dir.join(file_name);

        let mut file = fs::File::create(&path)?;
        let bytes = io::copy(source, &mut file)?;
        debug!(path = %path.display(), bytes, "stored image file");

        let image = CardImage::with_id(id, name, path);
        self.save_image(image.clone());
        Ok(image)
    }

    fn persist(&mut self) {
        if let Err(err) = self.storage.save(&self.images) {
            warn!(error = %err, "failed to save card images, keeping in-memory catalogue");
        }
    }
}

impl<S: ImageStorage> CardImageRepository for ImageCatalogue<S> {
    fn all_images(&self) -> Vec<CardImage> {
        self.images.clone()
    }

    fn image(&self, id: &str) -> Option<CardImage> {
        self.images.iter().find(|i| i.id() == id).cloned()
    }

    fn save_image(&mut self, image: CardImage) {
        self.images.retain(|i| i.id() != image.id());
        info!(id = image.id(), name = image.name(), "card image saved");
        self.images.push(image);
        self.persist();
    }

    fn delete_image(&mut self, id: &str) -> Option<CardImage> {
        let index = self.images.iter().position(|i| i.id() == id)?;
        let image = self.images.remove(index);

        match fs::remove_file(image.file_path()) {
            Ok(()) => debug!(path = %image.file_path().display(), "deleted image file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(error = %err, path = %image.file_path().display(), "failed to delete image file"),
        }

        info!(id, "card image deleted");
        self.persist();
        Some(image)
    }
}
