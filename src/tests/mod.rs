mod bit_field_tests;
mod context_tests;
mod render_system_tests;
mod system_registry_tests;
