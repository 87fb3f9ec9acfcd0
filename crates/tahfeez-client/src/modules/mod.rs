pub(crate) mod auth;
pub(crate) mod billing;
pub(crate) mod catalog;
pub(crate) mod goals;
pub(crate) mod messages;
pub(crate) mod shared;
pub(crate) mod system;
