pub mod prelude;

pub mod decision_records;
pub mod users;
