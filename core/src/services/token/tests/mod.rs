mod facade_tests;
mod mocks;
