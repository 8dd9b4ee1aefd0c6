//! # Domain Models
//!
//! Pure data types for the compliance-control registry with minimal dependencies (`serde`,
//! plus `utoipa` schemas behind the `openapi` feature).
//! Keep it lean: no I/O, networking, or locking here, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod control;
pub mod slice;
