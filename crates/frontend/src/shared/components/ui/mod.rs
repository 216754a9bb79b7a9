pub mod input;
pub mod label;
pub mod select;

pub use input::Input;
pub use label::FieldLabel;
pub use select::Select;
