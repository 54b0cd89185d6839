pub mod bootstrap;
pub mod channels;
pub mod config;
pub mod detect;
pub mod providers;
pub mod translate;
