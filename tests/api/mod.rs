//! REST API tests against the in-memory store.

mod course_tests;
mod health_tests;
mod reorder_tests;
