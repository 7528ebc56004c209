pub mod short_id;
pub mod storage;
