mod backup_dto;

pub use backup_dto::BackupDocument;
