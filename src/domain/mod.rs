//! Domain types mirrored from the backend plus the pure logic applied to them.

pub mod access;
pub mod address;
pub mod employee;
pub mod package;
pub mod report;
pub mod types;
pub mod user;
