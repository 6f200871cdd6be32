mod loader_tests;
mod validate_tests;
