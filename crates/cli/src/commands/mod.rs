pub mod compare;
pub mod config_cmd;
pub mod form;
pub mod load;
pub mod menu;
pub mod onboard;
pub mod participants;
pub mod report;
pub mod survey;
