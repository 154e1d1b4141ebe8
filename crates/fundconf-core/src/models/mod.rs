//! Configuration, raw records and output rows.

pub mod config;
pub mod record;
pub mod row;
