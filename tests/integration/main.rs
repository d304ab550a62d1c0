//! HTTP-level integration tests. Every test builds the full router over
//! fresh in-memory stores and a temporary upload directory.

mod helpers;

mod client_test;
mod message_test;
mod notification_test;
mod task_test;
mod upload_test;
mod user_test;
