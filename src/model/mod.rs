pub mod department;
pub mod employee;
pub mod response;
pub mod statistics;
