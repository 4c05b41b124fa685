//! # streetlight-domain
//!
//! Pure domain model for the streetlight controller.
//!
//! ## Responsibilities
//! - Foundational types: light identifiers, error conventions, timestamps
//! - Define the per-light state (**reading**, **actuation**, **override**)
//! - Define manual **actions** (`on` / `off`) issued by an operator
//! - Define **events** (observable state changes)
//! - Own the **auto-control policy** — a pure function of reading and actuation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod event;
pub mod light;
pub mod policy;
