mod default;
mod from_str;

pub use default::TypeTraitDefault;
pub use from_str::{ConversionError, TypeTraitFromStr};
