mod backup_service;

pub use backup_service::{attachment_filename, BackupService, BACKUP_TABLES};
