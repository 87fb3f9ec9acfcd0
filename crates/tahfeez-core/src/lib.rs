#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

//! Shared types for the tahfeez client: wire payloads, the response
//! envelope, domain records and the small pieces of pure logic that sit
//! beside them (filters, registration validation, onboarding state).

pub mod api;
pub mod constants;
pub mod filters;
pub mod models;
pub mod onboarding;
pub mod validation;

pub use crate::api::*;
pub use crate::constants::*;
pub use crate::filters::*;
pub use crate::models::*;
pub use crate::onboarding::*;
pub use crate::validation::*;
