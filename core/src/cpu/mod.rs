pub mod sm83;

pub use sm83::{CpuError, Sm83};
