pub mod current_records;
pub mod metrics;
pub mod ranking_engine;
pub mod record_computation;
pub mod record_engine;
