//! Statement/expression duality.
//!
//! Translating one IR node may produce an expression or statements depending
//! on what the target can express. [`StmtOrExpr`] lets the caller carry either
//! without branching until emission, and flatten any of them into an
//! equivalent statement list.

use smallvec::{SmallVec, smallvec};
use tmpl_common::limits::INLINE_STMTS;
use tmpl_common::{Position, Positioned};
use tmpl_ir::{BlockStatement, Expression, Statement};

/// A flattened run of statements. Usually one or two long.
pub type StmtList = SmallVec<[Statement; INLINE_STMTS]>;

/// A translation that produced a single expression.
#[derive(Clone, Debug, PartialEq)]
pub struct OneExpr(pub Expression);

impl OneExpr {
    pub fn pos(&self) -> Position {
        self.0.pos()
    }

    /// Wrap the expression as an expression statement.
    pub fn into_stmt(self) -> Stmt {
        Stmt::One(Statement::expr(self.0))
    }
}

/// A translation that produced statements.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    One(Statement),
    Many { pos: Position, stmts: StmtList },
}

/// Borrowed view of the node a [`StmtOrExpr`] wraps.
#[derive(Copy, Clone, Debug)]
pub enum RawNode<'a> {
    Expression(&'a Expression),
    Statement(&'a Statement),
    Statements(&'a [Statement]),
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtOrExpr {
    Expr(OneExpr),
    Stmt(Stmt),
}

// =============================================================================
// Stmt
// =============================================================================

impl Stmt {
    pub fn many(pos: Position, stmts: impl IntoIterator<Item = Statement>) -> Self {
        Stmt::Many {
            pos,
            stmts: stmts.into_iter().collect(),
        }
    }

    /// Merge any number of translations into one statement run. Each part is
    /// flattened first, so how the parts were grouped does not matter.
    pub fn concat(pos: Position, parts: impl IntoIterator<Item = StmtOrExpr>) -> Self {
        let mut stmts = StmtList::new();
        for part in parts {
            stmts.extend(part.into_stmt_list());
        }
        Stmt::Many { pos, stmts }
    }

    pub fn pos(&self) -> Position {
        match self {
            Stmt::One(stmt) => stmt.pos(),
            Stmt::Many { pos, .. } => *pos,
        }
    }

    pub fn raw(&self) -> RawNode<'_> {
        match self {
            Stmt::One(stmt) => RawNode::Statement(stmt),
            Stmt::Many { stmts, .. } => RawNode::Statements(stmts),
        }
    }

    /// Equivalent statement list. A lone block contributes its body.
    pub fn as_stmt_list(&self) -> StmtList {
        match self {
            Stmt::One(Statement::Block(block)) => block.body.iter().cloned().collect(),
            Stmt::One(stmt) => smallvec![stmt.clone()],
            Stmt::Many { stmts, .. } => stmts.clone(),
        }
    }

    pub fn into_stmt_list(self) -> StmtList {
        match self {
            Stmt::One(Statement::Block(block)) => block.body.into_iter().collect(),
            Stmt::One(stmt) => smallvec![stmt],
            Stmt::Many { stmts, .. } => stmts,
        }
    }

    /// A single statement, wrapping a run in a block.
    pub fn to_statement(self) -> Statement {
        match self {
            Stmt::One(stmt) => stmt,
            Stmt::Many { pos, stmts } => Statement::block(pos, stmts.into_vec()),
        }
    }

    /// A block statement. A lone non-block statement becomes a one-element
    /// block.
    pub fn to_block(self) -> BlockStatement {
        match self {
            Stmt::One(Statement::Block(block)) => block,
            Stmt::One(stmt) => BlockStatement::new(stmt.pos(), vec![stmt]),
            Stmt::Many { pos, stmts } => BlockStatement::new(pos, stmts.into_vec()),
        }
    }
}

// =============================================================================
// StmtOrExpr
// =============================================================================

impl StmtOrExpr {
    pub fn pos(&self) -> Position {
        match self {
            StmtOrExpr::Expr(expr) => expr.pos(),
            StmtOrExpr::Stmt(stmt) => stmt.pos(),
        }
    }

    pub fn raw(&self) -> RawNode<'_> {
        match self {
            StmtOrExpr::Expr(OneExpr(expr)) => RawNode::Expression(expr),
            StmtOrExpr::Stmt(stmt) => stmt.raw(),
        }
    }

    pub fn as_stmt_list(&self) -> StmtList {
        match self {
            StmtOrExpr::Expr(OneExpr(expr)) => smallvec![Statement::expr(expr.clone())],
            StmtOrExpr::Stmt(stmt) => stmt.as_stmt_list(),
        }
    }

    pub fn into_stmt_list(self) -> StmtList {
        match self {
            StmtOrExpr::Expr(OneExpr(expr)) => smallvec![Statement::expr(expr)],
            StmtOrExpr::Stmt(stmt) => stmt.into_stmt_list(),
        }
    }

    /// The statement form, wrapping an expression as an expression statement.
    pub fn into_stmt(self) -> Stmt {
        match self {
            StmtOrExpr::Expr(expr) => expr.into_stmt(),
            StmtOrExpr::Stmt(stmt) => stmt,
        }
    }

    /// The expression, if this is one.
    pub fn as_expr(&self) -> Option<&Expression> {
        match self {
            StmtOrExpr::Expr(OneExpr(expr)) => Some(expr),
            StmtOrExpr::Stmt(_) => None,
        }
    }
}

impl From<Expression> for StmtOrExpr {
    fn from(expr: Expression) -> Self {
        StmtOrExpr::Expr(OneExpr(expr))
    }
}

impl From<Statement> for StmtOrExpr {
    fn from(stmt: Statement) -> Self {
        StmtOrExpr::Stmt(Stmt::One(stmt))
    }
}

impl From<Stmt> for StmtOrExpr {
    fn from(stmt: Stmt) -> Self {
        StmtOrExpr::Stmt(stmt)
    }
}

#[cfg(test)]
#[path = "../tests/stmt_or_expr_tests.rs"]
mod stmt_or_expr_tests;
