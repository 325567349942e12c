pub mod backend;
pub mod tutor;
