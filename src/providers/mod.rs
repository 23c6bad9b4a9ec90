pub mod search;
pub mod sheets;
