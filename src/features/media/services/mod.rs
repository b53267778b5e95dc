mod media_pipeline;
mod media_service;

pub use media_pipeline::{
    classify, object_path, process, validate_size, MediaKind, ProcessedMedia, MAX_IMAGE_BYTES,
    MAX_VIDEO_BYTES,
};
pub use media_service::MediaService;
