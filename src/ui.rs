pub mod log_pane;
pub mod toolbar;
pub mod viewport;
