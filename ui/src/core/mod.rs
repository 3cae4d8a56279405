pub mod chart;
pub mod format;
pub mod platform;
pub mod session;
pub mod storage;
