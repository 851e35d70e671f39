mod matrix;
mod token;

pub use matrix::PhiMatrix;
pub use token::Token;
