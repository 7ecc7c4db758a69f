//! sea-orm entities for the HR service tables.

pub mod outbox_events;
pub mod reports;
pub mod request_dates;
pub mod requests;
pub mod users;
