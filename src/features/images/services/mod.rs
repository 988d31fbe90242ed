mod image_upload_service;

pub use image_upload_service::{ImageUpload, ImageUploadService};
