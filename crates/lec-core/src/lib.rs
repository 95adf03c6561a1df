//! # lec-core
//!
//! Core types, ID helpers, and error types for Lectern.
//!
//! This crate provides the foundational types shared across all Lectern crates:
//! - The `QuizQuestion` entity and its option/answer sub-types
//! - Question type, operation kind, and notification severity enums
//! - Ephemeral ID generation and placeholder detection
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
