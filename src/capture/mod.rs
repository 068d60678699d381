pub(crate) mod download;
pub(crate) mod export;
pub(crate) mod filename;
pub(crate) mod tiers;
