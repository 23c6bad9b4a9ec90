pub mod number;
pub mod query;
pub mod row;
pub mod scorer;
