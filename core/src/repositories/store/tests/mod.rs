mod glob_tests;
