/// Surrogate keys (resources, slots, state entries) are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Block counts are signed 64-bit to match BIGINT storage; the external
/// chain only ever reports non-negative, monotonically increasing values.
pub type BlockNumber = i64;
