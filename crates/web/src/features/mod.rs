pub mod rankings;
pub mod records;
