//! Integration tests for capcomp

mod batch_validation;
mod catalog_loading;
mod composition_properties;
mod composition_scenarios;
mod support;
