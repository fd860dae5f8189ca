pub(crate) mod fixtures;

mod persist_tests;
