pub(crate) mod assemble;
pub(crate) mod frames;
