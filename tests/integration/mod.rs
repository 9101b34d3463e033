//! Integration tests for the Talos node store, resolver, and interpreter

mod persistence_roundtrip;
mod resolver_properties;
mod shell_scenarios;
mod store_integration;
