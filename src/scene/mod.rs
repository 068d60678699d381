pub(crate) mod camera;
pub(crate) mod controls;
pub(crate) mod lights;
pub(crate) mod loading;
pub(crate) mod model;
pub(crate) mod resources;
pub(crate) mod reveal;
pub(crate) mod stage;
