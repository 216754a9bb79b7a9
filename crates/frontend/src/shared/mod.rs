pub mod ajax;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod grid;
pub mod icons;
pub mod modal_frame;
