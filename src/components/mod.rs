pub mod alerts;
pub mod badge;
pub mod data_table;
pub mod delete;
pub mod inputs;
pub mod misc;
pub mod modal;
pub mod svg;
pub mod timestamp;
