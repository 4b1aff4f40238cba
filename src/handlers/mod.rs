pub mod absences;
pub mod employees;
pub mod reference;
pub mod reports;
pub mod shared;
pub mod work_groups;
pub mod work_hours;
