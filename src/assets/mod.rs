pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod logo_storage;
pub(crate) mod object_url;
pub(crate) mod text;
