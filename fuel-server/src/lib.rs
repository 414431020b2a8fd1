//! Fuel station route planner server.
//!
//! A web application that answers: "where should I stop for fuel on
//! my way to this destination?"

pub mod catalog;
pub mod domain;
pub mod geo;
pub mod planner;
pub mod routing;
pub mod web;
