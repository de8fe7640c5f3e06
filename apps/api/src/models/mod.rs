pub mod options;
pub mod quote;
pub mod review;
