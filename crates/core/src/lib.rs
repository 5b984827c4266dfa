//! Core bookkeeping logic for Tallybook.
//!
//! This crate contains pure business logic with ZERO ui or database
//! dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `journal` - Journal entry editing, balancing, and tax calculation
//! - `workflow` - Entry lifecycle (draft/posted) and reversal
//! - `listing` - Filter model for the journal entry listing screen
//! - `dashboard` - KPI snapshot types and display formatting

pub mod dashboard;
pub mod journal;
pub mod listing;
pub mod workflow;
