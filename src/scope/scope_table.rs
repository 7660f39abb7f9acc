use std::collections::HashMap;

use log::debug;

use crate::{ast::types::Type, Position};

/// Index of a frame inside a [`ScopeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const GLOBAL: Self = Self(0);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable,
    Function { params: Vec<Type>, is_prototype: bool },
    Enum,
    EnumValue,
}

/// Symbol information
///
/// For functions `ty` is the declared return type.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    pub name: String,
    pub ty: Type,
    pub position: Position,
    pub kind: SymbolKind,
}

impl SymbolInfo {
    pub fn variable(name: impl Into<String>, ty: Type, position: Position) -> Self {
        SymbolInfo {
            name: name.into(),
            ty,
            position,
            kind: SymbolKind::Variable,
        }
    }

    pub fn function(
        name: impl Into<String>,
        return_type: Type,
        params: Vec<Type>,
        is_prototype: bool,
        position: Position,
    ) -> Self {
        SymbolInfo {
            name: name.into(),
            ty: return_type,
            position,
            kind: SymbolKind::Function {
                params,
                is_prototype,
            },
        }
    }

    pub fn enumeration(name: impl Into<String>, position: Position) -> Self {
        SymbolInfo {
            name: name.into(),
            ty: Type::Enum,
            position,
            kind: SymbolKind::Enum,
        }
    }

    pub fn enum_value(name: impl Into<String>, position: Position) -> Self {
        SymbolInfo {
            name: name.into(),
            ty: Type::Int,
            position,
            kind: SymbolKind::EnumValue,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable)
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, SymbolKind::Enum)
    }

    pub fn is_enum_value(&self) -> bool {
        matches!(self.kind, SymbolKind::EnumValue)
    }

    pub fn is_prototype(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Function {
                is_prototype: true,
                ..
            }
        )
    }

    /// Parameter types, only present for functions.
    pub fn params(&self) -> Option<&[Type]> {
        match &self.kind {
            SymbolKind::Function { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Turns a prototype into a definition.
    pub fn complete_prototype(&mut self) {
        if let SymbolKind::Function { is_prototype, .. } = &mut self.kind {
            *is_prototype = false;
        }
    }
}

/// Scope information
///
/// A name maps to a list because a function name may carry several overloads.
/// Any other kind of symbol occupies its name alone.
#[derive(Debug, Default)]
pub struct ScopeFrame {
    pub symbols: HashMap<String, Vec<SymbolInfo>>,
    pub children: Vec<ScopeId>,
    pub parent: Option<ScopeId>,
    pub level: u32,
}

impl ScopeFrame {
    pub fn get(&self, name: &str) -> &[SymbolInfo] {
        self.symbols.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A tree of scope frames stored flat, addressed by [`ScopeId`].
///
/// Frames are never removed; leaving a scope only moves `current` back to the parent.
#[derive(Debug)]
pub struct ScopeTable {
    frames: Vec<ScopeFrame>,
    current: ScopeId,
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTable {
    pub fn new() -> Self {
        ScopeTable {
            frames: vec![ScopeFrame::default()],
            current: ScopeId::GLOBAL,
        }
    }

    pub fn enter_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.frames.len());
        let level = self.current_frame().level + 1;

        self.frames.push(ScopeFrame {
            parent: Some(self.current),
            level,
            ..ScopeFrame::default()
        });
        self.frames[self.current.0].children.push(id);
        self.current = id;

        debug!("ScopeTable: entered scope {} at level {}", id.0, level);
        id
    }

    /// Moves back to the parent frame. The global frame is never left.
    pub fn exit_scope(&mut self) -> Option<ScopeId> {
        let Some(parent) = self.current_frame().parent else {
            debug!("ScopeTable: attempted to exit the global scope");
            return None;
        };

        debug!("ScopeTable: exited scope {} back to {}", self.current.0, parent.0);
        self.current = parent;
        Some(parent)
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn current_level(&self) -> u32 {
        self.current_frame().level
    }

    pub fn current_frame(&self) -> &ScopeFrame {
        &self.frames[self.current.0]
    }

    pub fn frame(&self, id: ScopeId) -> &ScopeFrame {
        &self.frames[id.0]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Adds a symbol to the current frame.
    pub fn declare(&mut self, symbol: SymbolInfo) {
        debug!(
            "ScopeTable: declared '{}' ({:?}) in scope {}",
            symbol.name, symbol.kind, self.current.0
        );

        let current = self.current.0;
        self.frames[current]
            .symbols
            .entry(symbol.name.clone())
            .or_default()
            .push(symbol);
    }

    /// All entries for `name` in the nearest frame that has any, walking to the root.
    pub fn lookup_all(&self, name: &str) -> &[SymbolInfo] {
        self.lookup_all_from(self.current, name)
    }

    fn lookup_all_from(&self, start: ScopeId, name: &str) -> &[SymbolInfo] {
        let mut scope = Some(start);

        while let Some(id) = scope {
            let frame = &self.frames[id.0];
            let found = frame.get(name);
            if !found.is_empty() {
                return found;
            }
            scope = frame.parent;
        }

        &[]
    }

    /// Resolves `name` from the current frame outwards.
    pub fn lookup(&self, name: &str) -> Option<&SymbolInfo> {
        self.lookup_all(name).first()
    }

    /// Resolves `name` starting at the parent of the current frame.
    pub fn lookup_enclosing(&self, name: &str) -> Option<&SymbolInfo> {
        let parent = self.current_frame().parent?;
        self.lookup_all_from(parent, name).first()
    }

    pub fn lookup_local(&self, name: &str) -> Option<&SymbolInfo> {
        self.current_frame().get(name).first()
    }

    pub fn lookup_local_all(&self, name: &str) -> &[SymbolInfo] {
        self.current_frame().get(name)
    }

    pub fn lookup_local_mut(&mut self, name: &str) -> Option<&mut SymbolInfo> {
        let current = self.current.0;
        self.frames[current]
            .symbols
            .get_mut(name)
            .and_then(|symbols| symbols.first_mut())
    }

    /// Finds the function overload in the current frame with exactly these parameter types.
    pub fn lookup_local_function_mut(
        &mut self,
        name: &str,
        params: &[Type],
    ) -> Option<&mut SymbolInfo> {
        let current = self.current.0;
        self.frames[current]
            .symbols
            .get_mut(name)?
            .iter_mut()
            .find(|symbol| symbol.params() == Some(params))
    }
}
