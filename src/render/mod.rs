pub(crate) mod badge;
pub(crate) mod layout;
pub(crate) mod progress;
pub(crate) mod raster;
pub(crate) mod svg;
pub(crate) mod text;
