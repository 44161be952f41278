pub mod controls;
pub mod help_overlay;
pub mod mood_bar;
pub mod track_list;
pub mod weather_panel;
