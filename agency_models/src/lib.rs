pub mod pagination;
pub mod submission;
pub mod violation;

mod macros;
