pub mod adapter;
pub mod destination;
pub mod error;
pub mod query;
#[cfg(test)]
pub(crate) mod recording;
pub mod row;
pub mod source;
pub mod transaction;
