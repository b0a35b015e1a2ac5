//! Memory LCD panel drivers

mod ls013b7dh03;

pub use ls013b7dh03::Ls013b7dh03;
