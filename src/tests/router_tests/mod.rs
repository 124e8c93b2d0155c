mod admin_tests;
mod intake_tests;
mod pricing_tests;
