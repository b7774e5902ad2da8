mod controller_tests;
mod settings_tests;
mod window_tests;
