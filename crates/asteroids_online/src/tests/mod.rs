//! Session-level tests driving the client through a loopback server

mod session_flow;
