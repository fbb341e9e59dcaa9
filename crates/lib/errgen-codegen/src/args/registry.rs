use crate::args::kinds::builtin_kinds;
use crate::prelude::*;
use errgen_definitions::definition::ArgDecl;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Argument kinds addressable by their type name.
///
/// Kinds are validated when registered, so code generation never meets a
/// strategy that does not fit its concern.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    kinds: HashMap<String, Arc<ErrorArgKind>>,
    builtin_kinds_loaded: bool,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every builtin kind.
    pub fn with_builtin_kinds() -> CodeGeneratorResult<Self> {
        let mut registry = Self::new();
        registry.load_builtin_kinds()?;
        Ok(registry)
    }

    /// Registers the builtin kinds. Calling this again is a no-op.
    pub fn load_builtin_kinds(&mut self) -> CodeGeneratorResult<()> {
        if self.builtin_kinds_loaded {
            return Ok(());
        }

        for kind in builtin_kinds()? {
            self.register(kind)?;
        }

        self.builtin_kinds_loaded = true;
        debug!(kinds = self.kinds.len(), "Builtin argument kinds loaded");

        Ok(())
    }

    pub fn register(&mut self, kind: ErrorArgKind) -> CodeGeneratorResult<()> {
        if self.kinds.contains_key(kind.type_name()) {
            error!(kind = %kind.type_name(), "Argument kind registered twice");
            return Err(CodeGeneratorError::DuplicateRegistration {
                name: kind.type_name().to_string(),
            });
        }

        kind.validate().inspect_err(|error| {
            error!(kind = %kind.type_name(), error = %error, "Rejected an invalid argument kind");
        })?;

        self.kinds
            .insert(kind.type_name().to_string(), Arc::new(kind));

        Ok(())
    }

    pub fn get(&self, type_name: &str) -> CodeGeneratorResult<Arc<ErrorArgKind>> {
        self.kinds
            .get(type_name)
            .cloned()
            .ok_or_else(|| CodeGeneratorError::UnknownType {
                name: type_name.to_string(),
            })
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.kinds.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolves a declared argument against its registered kind.
    pub fn create_error_arg(&self, decl: &ArgDecl) -> CodeGeneratorResult<ErrorArg> {
        let kind = self.get(&decl.type_name).inspect_err(|_| {
            error!(arg = %decl.name, kind = %decl.type_name, "Argument uses an unregistered kind");
        })?;

        Ok(ErrorArg::new(&decl.name, decl.nullable, kind))
    }
}
