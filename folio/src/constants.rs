pub const LIKES_KEY_PREFIX: &str = "post:likes";
pub const MAX_SLUG_LENGTH: usize = 128;
pub const MAX_BULK_SLUGS: usize = 50;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_MAX_LIKES_PER_POST: u32 = 12;
pub const DEFAULT_FLUSH_IDLE_MS: u64 = 500;
