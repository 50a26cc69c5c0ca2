pub use display::{Display, Palette};

mod display;
