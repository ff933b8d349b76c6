pub mod row;
pub mod subject;

pub use row::Row;
pub use subject::{Module, Status, SubTopic, Subject, Topic};
