//! Typed operators and associativity-aware folding.
//!
//! Each [`TmplOperator`] variant is a type-specialized instance of an operator:
//! its result type is fixed by the variant, not by its operands. Variants that
//! share surface syntax point at one shared [`OperatorDefinition`], so fixity
//! and precedence live in exactly one place.

use crate::tmpl::Expression;
use crate::types::{DefId, Type};
use tmpl_common::{OutputToken, OutputTokenType, Position, Positioned, is_identifier};

// =============================================================================
// Operator definitions
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fixity {
    Prefix,
    Infix {
        /// Higher binds tighter.
        precedence: u8,
        associativity: Associativity,
    },
}

/// Surface syntax shared by one or more typed operators.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct OperatorDefinition {
    pub text: &'static str,
    pub fixity: Fixity,
}

impl OperatorDefinition {
    const fn infix(text: &'static str, precedence: u8, associativity: Associativity) -> Self {
        OperatorDefinition {
            text,
            fixity: Fixity::Infix {
                precedence,
                associativity,
            },
        }
    }

    const fn prefix(text: &'static str) -> Self {
        OperatorDefinition {
            text,
            fixity: Fixity::Prefix,
        }
    }

    pub fn token_type(&self) -> OutputTokenType {
        if is_identifier(self.text) {
            OutputTokenType::Word
        } else {
            OutputTokenType::Punctuation
        }
    }

    pub fn output_token(&self) -> OutputToken {
        OutputToken::new(self.text, self.token_type())
    }

    pub fn associativity(&self) -> Option<Associativity> {
        match self.fixity {
            Fixity::Infix { associativity, .. } => Some(associativity),
            Fixity::Prefix => None,
        }
    }

    pub fn precedence(&self) -> Option<u8> {
        match self.fixity {
            Fixity::Infix { precedence, .. } => Some(precedence),
            Fixity::Prefix => None,
        }
    }
}

pub static AMP_AMP: OperatorDefinition = OperatorDefinition::infix("&&", 4, Associativity::Left);
pub static BAR_BAR: OperatorDefinition = OperatorDefinition::infix("||", 3, Associativity::Left);
pub static BANG: OperatorDefinition = OperatorDefinition::prefix("!");
pub static EQ_EQ: OperatorDefinition = OperatorDefinition::infix("==", 8, Associativity::Left);
pub static BANG_EQ: OperatorDefinition = OperatorDefinition::infix("!=", 8, Associativity::Left);
pub static LT: OperatorDefinition = OperatorDefinition::infix("<", 9, Associativity::Left);
pub static LT_EQ: OperatorDefinition = OperatorDefinition::infix("<=", 9, Associativity::Left);
pub static GT: OperatorDefinition = OperatorDefinition::infix(">", 9, Associativity::Left);
pub static GT_EQ: OperatorDefinition = OperatorDefinition::infix(">=", 9, Associativity::Left);
pub static PLUS: OperatorDefinition = OperatorDefinition::infix("+", 11, Associativity::Left);
pub static MINUS: OperatorDefinition = OperatorDefinition::infix("-", 11, Associativity::Left);
pub static STAR: OperatorDefinition = OperatorDefinition::infix("*", 12, Associativity::Left);
pub static PREFIX_MINUS: OperatorDefinition = OperatorDefinition::prefix("-");
pub static INSTANCEOF: OperatorDefinition =
    OperatorDefinition::infix("instanceof", 9, Associativity::Left);

// =============================================================================
// TmplOperator
// =============================================================================

/// The closed set of typed operators the IR uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TmplOperator {
    And,
    Or,
    Not,
    EqInt,
    NeInt,
    LtInt,
    LeInt,
    GtInt,
    GeInt,
    PlusInt,
    MinusInt,
    TimesInt,
    NegateInt,
    PlusFloat64,
    /// String concatenation. Shares `+` with the numeric additions.
    PlusString,
    InstanceOf,
}

impl TmplOperator {
    pub fn definition(self) -> &'static OperatorDefinition {
        match self {
            TmplOperator::And => &AMP_AMP,
            TmplOperator::Or => &BAR_BAR,
            TmplOperator::Not => &BANG,
            TmplOperator::EqInt => &EQ_EQ,
            TmplOperator::NeInt => &BANG_EQ,
            TmplOperator::LtInt => &LT,
            TmplOperator::LeInt => &LT_EQ,
            TmplOperator::GtInt => &GT,
            TmplOperator::GeInt => &GT_EQ,
            TmplOperator::PlusInt | TmplOperator::PlusFloat64 | TmplOperator::PlusString => &PLUS,
            TmplOperator::MinusInt => &MINUS,
            TmplOperator::TimesInt => &STAR,
            TmplOperator::NegateInt => &PREFIX_MINUS,
            TmplOperator::InstanceOf => &INSTANCEOF,
        }
    }

    pub fn result_type(self) -> Type {
        let def = match self {
            TmplOperator::And
            | TmplOperator::Or
            | TmplOperator::Not
            | TmplOperator::EqInt
            | TmplOperator::NeInt
            | TmplOperator::LtInt
            | TmplOperator::LeInt
            | TmplOperator::GtInt
            | TmplOperator::GeInt
            | TmplOperator::InstanceOf => DefId::BOOLEAN,
            TmplOperator::PlusInt
            | TmplOperator::MinusInt
            | TmplOperator::TimesInt
            | TmplOperator::NegateInt => DefId::INT,
            TmplOperator::PlusFloat64 => DefId::FLOAT64,
            TmplOperator::PlusString => DefId::STRING,
        };
        Type::simple(def)
    }

    pub fn output_token(self) -> OutputToken {
        self.definition().output_token()
    }

    pub fn is_infix(self) -> bool {
        matches!(self.definition().fixity, Fixity::Infix { .. })
    }

    /// Fold `operands` into nested [`Expression::Infix`] nodes using this
    /// operator's associativity. `identity` is returned when there are no
    /// operands.
    ///
    /// # Panics
    ///
    /// If this is a prefix operator.
    pub fn join_operands(
        self,
        pos: Position,
        identity: Expression,
        operands: Vec<Expression>,
    ) -> Expression {
        let associativity = self
            .definition()
            .associativity()
            .unwrap_or_else(|| panic!("{self:?} is not infix"));
        join(identity, operands, associativity, |left, right| {
            let node_pos = if pos.is_unknown() {
                left.pos().spanning(right.pos())
            } else {
                pos
            };
            Expression::infix(node_pos, left, self, right)
        })
    }
}

// =============================================================================
// join
// =============================================================================

/// Fold `elements` with `combine`, nesting according to `associativity`.
///
/// While the accumulator still equals `identity`, the next element replaces
/// it instead of being combined, so `combine(identity, x)` is never built.
/// Left folds in order, giving `((e0 op e1) op e2)`. Right walks from the
/// back, giving `(e0 op (e1 op e2))`. No elements yields `identity` and one
/// element yields that element.
pub fn join<T: PartialEq>(
    identity: T,
    elements: Vec<T>,
    associativity: Associativity,
    mut combine: impl FnMut(T, T) -> T,
) -> T {
    let mut acc: Option<T> = None;
    let mut step = |acc: Option<T>, element: T, element_on_left: bool| match acc {
        Some(acc) if acc != identity => Some(if element_on_left {
            combine(element, acc)
        } else {
            combine(acc, element)
        }),
        _ => Some(element),
    };
    match associativity {
        Associativity::Left => {
            for element in elements {
                acc = step(acc, element, false);
            }
        }
        Associativity::Right => {
            for element in elements.into_iter().rev() {
                acc = step(acc, element, true);
            }
        }
    }
    acc.unwrap_or(identity)
}

#[cfg(test)]
#[path = "../tests/operators_tests.rs"]
mod operators_tests;
