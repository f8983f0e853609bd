pub mod service;
pub mod store;
pub mod transcode;

pub use service::{StoredImages, TourImageService, TourUploads};
pub use store::ImageStore;
pub use transcode::{ImageRole, UploadedImage, is_image_content_type};
