//! Integration tests running the engine systems together

mod tick_integration;
