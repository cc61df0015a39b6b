pub mod agriculture;
pub mod business;
pub mod income;
pub mod livestock;
