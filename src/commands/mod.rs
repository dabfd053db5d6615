pub mod logging;
pub mod note;
pub mod settings;
