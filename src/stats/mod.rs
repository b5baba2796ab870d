pub(crate) mod error;
pub(crate) mod fetch;
pub(crate) mod record;
