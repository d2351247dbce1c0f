pub mod chart;
pub mod chart_utils;
pub mod config_form;
pub mod input_form;
pub mod results_view;
