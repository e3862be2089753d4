mod dependency_test;
mod executor_test;
