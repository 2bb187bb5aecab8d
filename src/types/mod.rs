//! Type registry shared by the parser, the semantic analyzer and HIR lowering.
//!
//! Every compilation owns exactly one [TypeRegistry]. Types are identified by the
//! [TypeId] handed out at registration; two records with identical members are still
//! distinct types.

mod layout;
#[cfg(test)]
mod types_tests;

pub use layout::{MemberLayout, RecordLayout};

use std::collections::HashMap;
use std::fmt;

use crate::diagnostics::{ErrorKind, Reportable};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub const INT: Self = Self(0);
    pub const BOOL: Self = Self(1);
    pub const VOID: Self = Self(2);
    pub const UNDEFINED: Self = Self(3);

    #[inline]
    pub fn is_undefined(self) -> bool {
        self == Self::UNDEFINED
    }

    #[inline]
    pub fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    Builtin,
    Record(RecordLayout),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeInfo {
    pub id: TypeId,
    pub name: String,
    pub size: usize,
    pub kind: TypeKind,
}

impl TypeInfo {
    pub fn alignment(&self) -> usize {
        match &self.kind {
            TypeKind::Builtin => self.size.max(1),
            TypeKind::Record(layout) => layout.alignment,
        }
    }

    pub fn as_record(&self) -> Option<&RecordLayout> {
        match &self.kind {
            TypeKind::Record(layout) => Some(layout),
            TypeKind::Builtin => None,
        }
    }

    /// Builtins and defined records are complete; declared-only records are not.
    pub fn is_complete(&self) -> bool {
        match &self.kind {
            TypeKind::Builtin => self.size > 0,
            TypeKind::Record(layout) => layout.defined,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("type `{0}` is already declared")]
    AlreadyDeclared(String),
    #[error("type `{0}` is already defined")]
    AlreadyDefined(String),
    #[error("type `{0}` was never declared")]
    NotDeclared(String),
    #[error("member `{member}` of `{record}` has incomplete type `{ty}`")]
    IncompleteMember {
        record: String,
        member: String,
        ty: String,
    },
}

impl Reportable for TypeError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotDeclared(_) => ErrorKind::Unknown,
            _ => ErrorKind::Semantic,
        }
    }
}

#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    names: HashMap<String, TypeId>,
}

const BUILTINS: [(&str, usize); 4] = [("int", 4), ("bool", 8), ("void", 0), ("undefined", 0)];

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            names: HashMap::new(),
        };
        for (name, size) in BUILTINS {
            registry.insert(name, size, TypeKind::Builtin);
        }
        registry
    }

    fn insert(&mut self, name: &str, size: usize, kind: TypeKind) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeInfo {
            id,
            name: name.to_owned(),
            size,
            kind,
        });
        self.names.insert(name.to_owned(), id);
        id
    }

    /// Registers `name` as an empty record so it can be referenced before its definition.
    pub fn declare_type(&mut self, name: &str) -> Result<TypeId, TypeError> {
        if self.names.contains_key(name) {
            return Err(TypeError::AlreadyDeclared(name.to_owned()));
        }
        let id = self.insert(name, 0, TypeKind::Record(RecordLayout::default()));
        tracing::debug!(name, %id, "declared record type");
        Ok(id)
    }

    /// Fills a previously declared record with its members and computes its layout.
    pub fn define_type(
        &mut self,
        name: &str,
        members: Vec<(String, TypeId)>,
    ) -> Result<TypeId, TypeError> {
        let id = self
            .names
            .get(name)
            .copied()
            .ok_or_else(|| TypeError::NotDeclared(name.to_owned()))?;
        match &self.types[id.index()].kind {
            TypeKind::Record(layout) if !layout.defined => {}
            _ => return Err(TypeError::AlreadyDefined(name.to_owned())),
        }

        let layout = layout::compute(self, name, members)?;
        let size = layout.size;
        let info = &mut self.types[id.index()];
        info.size = size;
        info.kind = TypeKind::Record(layout);
        tracing::debug!(name, %id, size, "defined record type");
        Ok(id)
    }

    /// Removes `name` from the lookup table. The id itself is never reused.
    pub fn unregister_type(&mut self, name: &str) -> bool {
        self.names.remove(name).is_some()
    }

    /// Returns [TypeId::UNDEFINED] for unknown names.
    pub fn find_type(&self, name: &str) -> TypeId {
        self.names.get(name).copied().unwrap_or(TypeId::UNDEFINED)
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeInfo> {
        self.types.get(id.index())
    }

    pub fn name_of(&self, id: TypeId) -> &str {
        self.get(id).map_or("undefined", |info| info.name.as_str())
    }

    pub fn size_of(&self, id: TypeId) -> usize {
        self.get(id).map_or(0, |info| info.size)
    }

    pub fn is_builtin(&self, id: TypeId) -> bool {
        self.get(id)
            .is_some_and(|info| matches!(info.kind, TypeKind::Builtin))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
