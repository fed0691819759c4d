//! Request handlers organized by domain.

pub mod guest;
pub mod health;
pub mod seating;
pub mod table;
