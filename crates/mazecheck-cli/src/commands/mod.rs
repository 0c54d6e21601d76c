pub(crate) mod helpers;
pub(crate) mod render;
pub(crate) mod solve;
pub(crate) mod validate;
