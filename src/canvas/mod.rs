pub(crate) mod flat;
pub(crate) mod stack;
