pub mod employee;
pub mod extract;
pub mod profile;
pub mod random_wfh;
pub mod report;
pub mod request;
pub mod schedule;
