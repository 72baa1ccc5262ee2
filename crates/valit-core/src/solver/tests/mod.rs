mod config_tests;
mod property_tests;
