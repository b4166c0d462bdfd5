pub mod constants;
pub mod data_types;
pub mod errors;
pub mod menu_form;
pub mod page;
pub mod request_dispatcher;
pub mod result_renderer;
pub mod shared_main;
