//! Arena allocation for the flat AST.
//!
//! - Contiguous storage for every node of one parse
//! - Children referenced by typed ids
//! - Bulk deallocation: the tree goes away with the arena

use crate::ast::{
    Expr, ExprId, ExprRange, FunctionDef, FunctionId, ObjectProp, ParamRange, PropRange, Stmt,
    StmtId, StmtRange,
};
use crate::{to_u32, Name};

/// Storage for all AST nodes produced by one parse.
///
/// Lists (call args, block bodies, params) are flattened into side vectors
/// and referenced by ranges, so a node never owns a `Vec`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AstArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    stmts: Vec<Stmt>,
    stmt_lists: Vec<StmtId>,
    props: Vec<ObjectProp>,
    params: Vec<Name>,
    functions: Vec<FunctionDef>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 expression per 8 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated_exprs = source_len / 8;
        AstArena {
            exprs: Vec::with_capacity(estimated_exprs),
            expr_lists: Vec::with_capacity(estimated_exprs / 4),
            stmts: Vec::with_capacity(estimated_exprs / 4),
            stmt_lists: Vec::with_capacity(estimated_exprs / 4),
            props: Vec::new(),
            params: Vec::new(),
            functions: Vec::new(),
        }
    }

    // ===== Expressions =====

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Store a list of expression ids and return its range.
    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len());
        self.expr_lists.extend(ids);
        let len = to_u32(self.expr_lists.len()) - start;
        ExprRange::new(start, len)
    }

    #[inline]
    #[track_caller]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Statements =====

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn alloc_stmt_list(&mut self, ids: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len());
        self.stmt_lists.extend(ids);
        let len = to_u32(self.stmt_lists.len()) - start;
        StmtRange::new(start, len)
    }

    #[inline]
    #[track_caller]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.to_range()]
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    // ===== Object literal properties =====

    pub fn alloc_props(&mut self, props: impl IntoIterator<Item = ObjectProp>) -> PropRange {
        let start = to_u32(self.props.len());
        self.props.extend(props);
        let len = to_u32(self.props.len()) - start;
        PropRange::new(start, len)
    }

    #[inline]
    #[track_caller]
    pub fn get_props(&self, range: PropRange) -> &[ObjectProp] {
        &self.props[range.to_range()]
    }

    // ===== Functions =====

    pub fn alloc_params(&mut self, names: impl IntoIterator<Item = Name>) -> ParamRange {
        let start = to_u32(self.params.len());
        self.params.extend(names);
        let len = to_u32(self.params.len()) - start;
        ParamRange::new(start, len)
    }

    #[inline]
    #[track_caller]
    pub fn get_params(&self, range: ParamRange) -> &[Name] {
        &self.params[range.to_range()]
    }

    pub fn alloc_function(&mut self, function: FunctionDef) -> FunctionId {
        let id = FunctionId::new(to_u32(self.functions.len()));
        self.functions.push(function);
        id
    }

    #[inline]
    #[track_caller]
    pub fn get_function(&self, id: FunctionId) -> &FunctionDef {
        &self.functions[id.index()]
    }
}

#[cfg(test)]
mod tests;
