mod author;
mod blog;
mod pagination;
mod token;

pub use author::*;
pub use blog::*;
pub use pagination::*;
pub use token::*;
