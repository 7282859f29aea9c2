mod check;
mod compile;

pub use check::check;
pub use compile::{build_artifacts, compile};
