pub mod contest;
pub mod event;
pub mod memory;
pub mod person;
pub mod ranking;
pub mod record;
pub mod record_config;
pub mod result;
