pub mod counter;
pub mod logger;
pub mod math_util;
