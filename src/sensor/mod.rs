pub mod source;
pub mod transfer;

pub use source::{AnalogSource, LineSource, ScriptedSource};
pub use transfer::{TransferFunction, convert};
