pub(crate) mod ease;
pub(crate) mod floating;
pub(crate) mod tween;
