use crate::ast::Identifier;
use crate::types::TypeId;
use std::collections::HashMap;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variable {
    pub name: Identifier,
    pub ty: TypeId,
}

/// One flat table for the whole pass. Nested scopes share it.
#[derive(Debug, Default)]
pub struct VariableTable {
    variables: HashMap<Identifier, Variable>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `name` was not declared before. The first declaration wins.
    pub fn declare(&mut self, name: &str, ty: TypeId) -> bool {
        if self.variables.contains_key(name) {
            return false;
        }
        let variable = Variable {
            name: name.to_owned(),
            ty,
        };
        self.variables.insert(name.to_owned(), variable);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn type_of(&self, name: &str) -> TypeId {
        self.lookup(name).map_or(TypeId::UNDEFINED, |v| v.ty)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
