//! Boolean expression tree over versions

use std::fmt;

use super::operator::Operator;
use crate::version::Version;

/// A node of a range expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    Compare(Operator, Version),
}

impl Expression {
    /// Evaluate the tree for `version`. Both sides of `And`/`Or` are visited.
    pub fn interpret(&self, version: &Version) -> bool {
        match self {
            Expression::And(left, right) => {
                let left = left.interpret(version);
                let right = right.interpret(version);
                left && right
            }
            Expression::Or(left, right) => {
                let left = left.interpret(version);
                let right = right.interpret(version);
                left || right
            }
            Expression::Not(inner) => !inner.interpret(version),
            Expression::Compare(operator, operand) => operator.evaluate(version, operand),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::And(left, right) => write!(f, "({} & {})", left, right),
            Expression::Or(left, right) => write!(f, "({} | {})", left, right),
            Expression::Not(inner) => write!(f, "!({})", inner),
            Expression::Compare(operator, operand) => write!(f, "{}{}", operator, operand),
        }
    }
}

/// The root of a parsed range expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeExpression(Expression);

impl CompositeExpression {
    pub fn new(expression: Expression) -> Self {
        CompositeExpression(expression)
    }

    pub fn expression(&self) -> &Expression {
        &self.0
    }

    pub fn into_expression(self) -> Expression {
        self.0
    }

    pub fn and(self, other: CompositeExpression) -> Self {
        CompositeExpression(Expression::And(Box::new(self.0), Box::new(other.0)))
    }

    pub fn or(self, other: CompositeExpression) -> Self {
        CompositeExpression(Expression::Or(Box::new(self.0), Box::new(other.0)))
    }

    pub fn not(expression: CompositeExpression) -> Self {
        CompositeExpression(Expression::Not(Box::new(expression.0)))
    }

    pub fn compare(operator: Operator, version: Version) -> Self {
        CompositeExpression(Expression::Compare(operator, version))
    }

    pub fn eq(version: Version) -> Self {
        Self::compare(Operator::Equal, version)
    }

    pub fn neq(version: Version) -> Self {
        Self::compare(Operator::NotEqual, version)
    }

    pub fn gt(version: Version) -> Self {
        Self::compare(Operator::GreaterThan, version)
    }

    pub fn gte(version: Version) -> Self {
        Self::compare(Operator::GreaterThanOrEqual, version)
    }

    pub fn lt(version: Version) -> Self {
        Self::compare(Operator::LessThan, version)
    }

    pub fn lte(version: Version) -> Self {
        Self::compare(Operator::LessThanOrEqual, version)
    }

    pub fn interpret(&self, version: &Version) -> bool {
        self.0.interpret(version)
    }
}

impl From<Expression> for CompositeExpression {
    fn from(expression: Expression) -> Self {
        CompositeExpression(expression)
    }
}

impl fmt::Display for CompositeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_interpret_and_or_not() {
        let range = CompositeExpression::gte(v("1.0.0.0")).and(CompositeExpression::lt(v("2.0.0.0")));
        assert!(range.interpret(&v("1.5.0.0")));
        assert!(range.interpret(&v("2.0.0.0-beta")));
        assert!(!range.interpret(&v("2.0.0.0")));

        let either = CompositeExpression::eq(v("1.0.0.0")).or(CompositeExpression::eq(v("3.0.0.0")));
        assert!(either.interpret(&v("3.0.0.0")));
        assert!(!either.interpret(&v("2.0.0.0")));

        let negated = CompositeExpression::not(either);
        assert!(negated.interpret(&v("2.0.0.0")));
    }

    #[test]
    fn test_comparison_helpers() {
        let version = v("1.2.3.4");
        assert!(CompositeExpression::neq(v("1.2.3.5")).interpret(&version));
        assert!(CompositeExpression::gt(v("1.2.3.3")).interpret(&version));
        assert!(CompositeExpression::lte(v("1.2.3.4+build")).interpret(&version));
        assert!(!CompositeExpression::lt(v("1.2.3.4")).interpret(&version));
    }

    #[test]
    fn test_display() {
        let expr = CompositeExpression::not(
            CompositeExpression::gte(v("1.0.0.0")).and(CompositeExpression::neq(v("1.5.0.0"))),
        )
        .or(CompositeExpression::eq(v("0.0.0.0")));
        assert_eq!(expr.to_string(), "(!((>=1.0.0.0 & !=1.5.0.0)) | =0.0.0.0)");
    }
}
