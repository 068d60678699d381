pub(crate) mod active;
pub(crate) mod card;
pub(crate) mod logo;
pub(crate) mod store;
pub(crate) mod templates;
