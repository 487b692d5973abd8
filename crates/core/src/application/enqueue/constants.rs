// Enqueue constants (no magic values)

use crate::domain::Priority;

/// Priority given to jobs that leave it at 0
pub const DEFAULT_PRIORITY: Priority = 100;

/// Queue given to jobs that leave it empty (the unnamed queue)
pub const DEFAULT_QUEUE: &str = "";

/// Args given to jobs that leave them empty (an empty JSON array)
pub const DEFAULT_ARGS: &[u8] = b"[]";

/// Bound parameter ceiling of a single statement (SQLITE_MAX_VARIABLE_NUMBER on older builds)
pub const MAX_BIND_PARAMETERS: usize = 999;

/// Columns bound per row: queue, priority, run_at, job_class, args
pub const INSERT_COLUMNS: usize = 5;

/// Largest chunk that fits in one multi-row insert (199 rows)
pub const DEFAULT_BATCH_SIZE: usize = MAX_BIND_PARAMETERS / INSERT_COLUMNS;
