//! Application services orchestrating the domain over storage.

pub mod action_session;
pub mod catalog;
pub mod table;

pub use catalog::CatalogService;
pub use table::{TableRegistry, TableService};
