pub mod attendance;
pub mod students;
