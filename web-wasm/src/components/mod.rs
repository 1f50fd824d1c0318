pub mod candidate_input;
pub mod export_panel;
pub mod header;
pub mod history_list;
pub mod progress_bar;
pub mod result_panel;
