pub mod absence;
pub mod absence_type;
pub mod company;
pub mod employee;
pub mod work_group;
pub mod work_hours;

// Re-export all repositories for easy importing
pub use absence::AbsenceRepository;
pub use absence_type::AbsenceTypeRepository;
pub use company::CompanyRepository;
pub use employee::EmployeeRepository;
pub use work_group::WorkGroupRepository;
pub use work_hours::WorkHoursRepository;
