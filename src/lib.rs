//! Tenant-scoped authentication and registration invitations
//!
//! The crate is split into a `domain` core (value objects, entities, ports and
//! the authentication service), an `application` layer of use cases, and
//! `infrastructure` adapters for configuration, logging, encryption and
//! in-memory persistence.

pub mod application;
pub mod domain;
pub mod infrastructure;
