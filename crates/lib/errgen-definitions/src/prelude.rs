pub use crate::definition::errno::Errno;
pub use crate::definition::{ArgDecl, ErrorDefinition, ErrorGroup, HttpCode, MacroRef};
pub use crate::error::*;
pub use crate::template::{Segment, Template};

pub type DefinitionResult<T> = Result<T, DefinitionError>;
pub type TemplateResult<T> = Result<T, TemplateError>;
