//! Tokenverse - loyalty campaign marketplace
//!
//! Brands publish campaigns carrying a point reward; users enter them with
//! social-media submissions, building a daily streak that maps to a named
//! rank. Brand moderation drives each submission through its lifecycle, and
//! a token shop settles purchases against an Ethereum-compatible node,
//! crediting token balances exactly once per chain transaction.
//!
//! ## Architecture
//!
//! The [`ledger`] module is the engagement core: it owns every balance,
//! streak and submission-state rule. Everything around it is a
//! collaborator behind a narrow interface:
//!
//! - [`store`]: embedded SQLite record store (users, campaigns,
//!   submissions, notifications)
//! - [`feed`]: per-table change subscriptions emitted after each commit
//! - [`auth`]: email/password identity and CLI sessions
//! - [`wallet`]: JSON-RPC client for the payment node
//! - [`storage`]: directory-backed attachment storage

pub mod auth;
pub mod config;
pub mod domain;
pub mod feed;
pub mod ledger;
pub mod shop;
pub mod storage;
pub mod store;
pub mod wallet;

pub use domain::*;
