// sqlx error conversion
//
// Orphan rules forbid `From<sqlx::Error> for QueueError` here, so every call
// site maps explicitly. The original error is kept as the source.

use stowage_core::QueueError;

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> QueueError {
    QueueError::storage(err)
}
