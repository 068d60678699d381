pub(crate) mod accordion;
pub(crate) mod color_binding;
pub(crate) mod notify;
pub(crate) mod tabs;
pub(crate) mod view;
