pub(crate) mod easy;
