//! Integration tests for diary-notion
//!
//! Uses wiremock to simulate the Notion API and verifies end-to-end
//! behavior of the client, session resolution, and snapshot retrieval.

mod common;

mod test_session;
mod test_snapshot;
mod test_transport;
