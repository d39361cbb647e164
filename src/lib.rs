//! pastedb - A strict, deterministic ad-hoc query engine for pastebin records
//!
//! Requests arrive as loosely-typed string parameters (`query`, `fields`,
//! `sortby`, `order`, `limit`, `offset`) and flow through:
//!
//! 1. [`query`]: parse filters, resolve sort directions, apply paging defaults
//! 2. [`executor`]: one filter / order / limit / fetch chain against a [`store`]
//! 3. [`projector`]: reduce records to the requested fields
//!
//! [`api::PasteService`] orchestrates the pipeline together with keyed
//! writes and the optional external [`mirror`].

pub mod api;
pub mod cli;
pub mod entity;
pub mod executor;
pub mod mirror;
pub mod observability;
pub mod projector;
pub mod query;
pub mod store;
