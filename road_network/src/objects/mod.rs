pub mod lane;
pub mod node;
