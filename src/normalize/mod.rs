pub(crate) mod pad;
pub(crate) mod target;
