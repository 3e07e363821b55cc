mod parsing_tests;
mod validation_tests;
