pub mod config;
pub mod error;
pub mod event_time;
pub mod html_grid;
pub mod http_client;
pub mod line_expand;
pub mod model;
pub mod odds_cell;
pub mod output;
pub mod pipeline;
pub mod source;
