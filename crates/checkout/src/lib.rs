//! Samovar Checkout - order-draft persistence and checkout flow.
//!
//! This crate is the headless core behind the checkout screens of the
//! Samovar marketplace client: a three-step wizard with validation gates,
//! plus a debounced synchronization layer that mirrors the in-progress
//! order to a server-side draft so checkout survives interruption.
//!
//! # Modules
//!
//! - [`form`] - the mutable checkout form aggregate and its per-step gates
//! - [`steps`] - the delivery / payment / review step machine
//! - [`cart`] - read-only cart line items fed in by the cart collaborator
//! - [`pricing`] - pure derivation of subtotal, delivery fee, and total
//! - [`api`] - the order-draft REST transport and its in-memory test double
//! - [`sync`] - the debounced draft synchronization controller
//! - [`storage`] - best-effort local mirror of the form for same-device resume
//! - [`session`] - the facade the presentation layer holds
//! - [`config`] - environment-driven configuration
//! - [`error`] - the checkout error taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod form;
pub mod pricing;
pub mod session;
pub mod steps;
pub mod storage;
pub mod sync;
