mod naming_tests;
mod trigger_tests;
