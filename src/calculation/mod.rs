//! Calculation logic for the payroll service.
//!
//! This module contains the pay calculator, which derives base salary,
//! overtime pay, performance bonus and net salary from hours, rate and
//! deductions, and the currency rounding applied to its outputs.

mod pay_calculator;
mod rounding;

pub use pay_calculator::{OVERTIME_MULTIPLIER, PERFORMANCE_BONUS_RATE, compute, compute_rounded};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
