//! Planner module - Client implementation for the planning service API

pub mod messages;
pub mod rest;

pub use rest::PlannerRestClient;
