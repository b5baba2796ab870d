pub(crate) mod badge_service;
pub(crate) mod config;
pub(crate) mod query;
pub(crate) mod response;
