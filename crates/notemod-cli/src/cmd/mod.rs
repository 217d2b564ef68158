pub mod apply;
pub mod conjugate;
pub mod disable_skipped;
pub mod gender;
pub mod resize_image;
pub mod set_fields;
