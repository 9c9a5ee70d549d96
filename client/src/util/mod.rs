//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure helpers kept apart from the state machines to improve reuse and
//! testability: form-draft validation and avatar URL generation.

pub mod avatar;
pub mod forms;
