/// Multipart field carrying the recyclable flag on uploads
pub const RECYCLABLE_FIELD: &str = "isRecyclable";

/// Multipart field carrying the image on analysis requests
pub const ANALYSIS_IMAGE_FIELD: &str = "image";

/// Upload filename sent by the analysis client, whatever the source format
pub const ANALYSIS_UPLOAD_FILENAME: &str = "upload.jpg";

/// Content type sent by the analysis client, whatever the source format
pub const ANALYSIS_UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

/// Allowed MIME types for uploaded and analyzed images
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/heic",
    "application/octet-stream",
];

/// Check if a MIME type is accepted for image uploads
pub fn is_image_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_MIME_TYPES.contains(&content_type)
}
