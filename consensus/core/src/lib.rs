pub mod constants;
pub mod hashing;
pub mod mass;
pub mod sign;
pub mod subnets;
pub mod tx;
