//! Small building blocks shared by the controllers

pub mod css;
pub mod frame_slot;
