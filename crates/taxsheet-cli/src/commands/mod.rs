pub mod cells;
pub mod scenario;
