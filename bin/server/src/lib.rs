//! deployment-restarter web server.
//!
//! This crate provides the htmx web console for listing and restarting
//! Kubernetes deployments, behind a Keycloak login.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod pages;
