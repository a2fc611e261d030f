//! Adapter utilities for the `scrolltrigger` crate.
//!
//! The `scrolltrigger` crate is UI-agnostic: it computes scroll commands but
//! never moves anything. This crate provides small, framework-neutral helpers
//! for the host side:
//!
//! - [`Controller`]: owns an engine plus the page scroll position, forwards
//!   host scroll/resize events, and executes scroll commands
//! - [`Glide`]: exponential ease-out smooth scrolling (adapter-driven)
//!
//! This crate is intentionally framework-agnostic (no DOM/GUI bindings).
#![forbid(unsafe_code)]

mod controller;
mod smooth;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use smooth::Glide;
