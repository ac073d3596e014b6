pub mod file_utils;

#[cfg(test)]
#[path = "tests/file_utils_tests.rs"]
mod file_utils_tests;
