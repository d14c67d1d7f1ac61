//! Client-side authentication flows with roster-based admin role resolution.
//!
//! The crate mediates sign-in, sign-up, and password-reset against an
//! external identity provider while deciding admin status locally from a
//! fixed roster of privileged email addresses. The last role decision is
//! persisted through a [`store::RoleStore`] so restarts and concurrent
//! clients of the same storage agree on the role before the provider has
//! responded.

pub mod cli;
pub mod flow;
pub mod provider;
pub mod role;
pub mod roster;
pub mod store;
