//! Payroll service
//!
//! This crate stores employees, computes salaries from hours, rates,
//! overtime and deductions, and persists and queries the resulting salary
//! records by period, department or employee.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
