mod camel_case;

pub use camel_case::*;
