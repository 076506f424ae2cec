mod tv;   // alloc, Float
mod dual; // alloc, Float

pub use tv::*;
pub use dual::*;
