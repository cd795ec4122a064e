pub mod changes;
pub mod review;
pub mod webhook;

pub use changes::*;
pub use review::*;
pub use webhook::*;
