pub mod backend;
pub mod camera;
pub mod coach;
pub mod config;
pub mod frame;
pub mod health;
pub mod landmarks;
pub mod recording;
pub mod translator;
pub mod vocabulary;
