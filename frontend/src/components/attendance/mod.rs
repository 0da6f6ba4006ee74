pub mod history;
pub mod marker;
