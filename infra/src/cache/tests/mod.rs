//! Cache module tests
