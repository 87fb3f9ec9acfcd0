mod enums;
mod structs;

pub use enums::*;
pub use structs::*;

#[cfg(test)]
mod tests;
