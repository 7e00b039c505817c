pub mod date;

pub use date::parse_iso_date;
