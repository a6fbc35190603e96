//! Per-guild admin role management.

pub mod service;

pub use service::AdminRoleService;
