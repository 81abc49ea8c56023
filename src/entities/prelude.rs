pub use super::decision_records::Entity as DecisionRecords;
pub use super::users::Entity as Users;
