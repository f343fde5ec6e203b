/// CAS (Compare-And-Swap) 操作最大重试次数
pub const MAX_CAS_RETRIES: u32 = 20;

/// Lowest valid class id in the catalog
pub const MIN_CLASS_ID: u32 = 1;

/// Highest valid class id in the catalog
pub const MAX_CLASS_ID: u32 = 24;

/// Maximum note length in characters, measured after trimming
pub const MAX_NOTE_CHARS: usize = 4000;
