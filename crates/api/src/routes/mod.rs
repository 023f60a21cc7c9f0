//! HTTP route handlers.

pub mod activity;
pub mod contacts;
pub mod directory;
pub mod gadgets;
pub mod logs;
pub mod pages;
pub mod recon;
pub mod secure;
pub mod system;
