pub(crate) mod background;
pub(crate) mod logo;
pub(crate) mod name;
pub(crate) mod synth;
