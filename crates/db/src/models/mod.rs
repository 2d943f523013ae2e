//! Database row structs and their conversions to domain records.

pub mod template;
