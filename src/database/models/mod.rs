pub mod absence;
pub mod company;
pub mod employee;
pub mod macros;
pub mod work_group;
pub mod work_hours;

// Re-export all models for easy importing
pub use absence::*;
pub use company::*;
pub use employee::*;
pub use work_group::*;
pub use work_hours::*;
