pub mod fall_area;
pub mod input_box;
pub mod progress_bar;
pub mod result_panel;
pub mod start_panel;
