pub use crate::args::registry::TypeRegistry;
pub use crate::args::{ErrorArg, ErrorArgKind, ToJsonEncoding};
pub use crate::error::*;
pub use crate::model::{OdError, OdErrorGroup};
pub use crate::translation::context::{ContextVars, TranslationContext};
pub use crate::translation::expression::{CodeLine, Expression};
pub use crate::translation::line::{Line, LineEnding};
pub use crate::translation::strategy::{Concern, PreparedExpression, Strategy, StrategyKind};
pub use crate::{CodeGenerator, GeneratorOutput};

pub type CodeGeneratorResult<T> = Result<T, CodeGeneratorError>;
