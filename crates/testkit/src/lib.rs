mod yaml_runner;

pub use yaml_runner::{TestCase, TestResult, load_test_cases_from_str, run_compile_test};
