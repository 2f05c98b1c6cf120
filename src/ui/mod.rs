pub mod chart_utils;
pub mod chart_view;
pub mod controls;
