//! Custom card image catalogue.
//!
//! ## Key Types
//!
//! - `CardImage`: Metadata for one image file a deck can show
//! - `CardImageRepository`: List, look up, save and delete images
//! - `ImageCatalogue`: JSON-backed repository owning an image directory
//! - `ImageStorage`: Load/save port, implemented by `JsonFileStorage`

pub mod image;
pub mod storage;
pub mod store;

pub use image::CardImage;
pub use storage::ImageStorage;
pub use store::{CardImageRepository, ImageCatalogue};
