use super::{Primary, SymExpr};

/// An iterator that traverses the tree of expressions in left-to-right post-order (i.e.
/// depth-first). The argument of a function call is visited before the call itself.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a SymExpr>,
    last_visited: Option<&'a SymExpr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a SymExpr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a SymExpr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a SymExpr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }

    /// Visits the expression if its last child was just visited, otherwise pushes the children.
    fn visit_or_descend(&mut self, children: &'a [SymExpr]) -> Option<Option<&'a SymExpr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                self.stack.extend(children.iter().rev());
                None
            },
            _ => Some(self.visit()),
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                SymExpr::Primary(Primary::Call(_, arg)) => {
                    if self.is_last_visited(arg) {
                        return self.visit();
                    }
                    self.stack.push(arg);
                },
                SymExpr::Primary(_) => return self.visit(),
                SymExpr::Add(children) | SymExpr::Mul(children) => {
                    if let Some(visited) = self.visit_or_descend(children) {
                        return visited;
                    }
                },
                SymExpr::Exp(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        let expr = parse_expr("x^2 + sin(y)").unwrap();
        let visited = expr.post_order_iter()
            .map(|expr| match expr {
                SymExpr::Primary(Primary::Symbol(name)) => name.clone(),
                SymExpr::Primary(Primary::Rational(n)) => n.to_string(),
                SymExpr::Primary(Primary::Call(func, _)) => func.name().to_string(),
                SymExpr::Exp(..) => "^".to_string(),
                SymExpr::Add(_) => "+".to_string(),
                _ => "?".to_string(),
            })
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "2", "^", "y", "sin", "+"]);
    }
}
