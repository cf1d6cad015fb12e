mod feedback;
mod style;

pub use feedback::*;
pub use style::*;
