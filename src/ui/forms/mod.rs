//! Form rendering

mod field_renderer;
mod submission_form;

pub use submission_form::draw as draw_submission_form;
