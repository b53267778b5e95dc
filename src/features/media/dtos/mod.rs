mod media_dto;

pub use media_dto::{
    DeleteMediaDto, DeleteMediaResponseDto, MediaResponseDto, UploadMediaDto,
};
