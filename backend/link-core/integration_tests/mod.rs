//! Integration tests over real loopback sockets.
//!
//! Each test uses its own fixed port and runs serialized, so a slow worker
//! from one test can never hold a port another test binds.

mod link_tests;
