//! HR Policy Engine for multi-tenant attendance, leave and payroll
//!
//! This crate enforces per-company attendance windows, leave quotas and
//! payslip arithmetic. All wall-clock rules are evaluated at a fixed GMT+7
//! offset, and the HTTP layer in [`api`] exposes the operations as a JSON
//! service.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod service;
pub mod store;
