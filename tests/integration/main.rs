//! HTTP-level integration tests against the in-memory ledger.

mod guest_test;
mod helpers;
mod seating_test;
mod table_test;
