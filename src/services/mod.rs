pub mod controller;
pub mod sync_service;
pub mod view;

pub use controller::{CprController, SyncStats};
pub use sync_service::SyncService;
pub use view::{RowView, SubjectView, SyncCompletion, SyncTicket, ViewState};
