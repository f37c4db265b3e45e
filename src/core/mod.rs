pub mod chart;
pub mod config;
pub mod error;
pub mod experiment;
pub mod motion;
pub mod playback;
pub mod window;
