pub mod fixed_point;
pub mod lmsr;
pub mod fees;
pub mod token;
