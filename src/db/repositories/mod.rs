pub mod decision;
pub mod user;
