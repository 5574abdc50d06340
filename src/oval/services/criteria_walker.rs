use crate::oval::domain::{Criteria, CriteriaChild, CriteriaOperator, Criterion};
use std::ops::ControlFlow;

/// Callbacks fired by `CriteriaWalker` in depth-first pre-order
///
/// `enter_criteria` runs before any child of the node, `exit_criteria` after the
/// last one, which is enough to fold the tree bottom-up (e.g. boolean evaluation)
/// without a second traversal. Returning `ControlFlow::Break` stops the walk.
pub trait CriteriaVisitor<'doc> {
    fn enter_criteria(&mut self, _criteria: &'doc Criteria, _depth: usize) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_criterion(&mut self, criterion: &'doc Criterion, depth: usize) -> ControlFlow<()>;

    fn exit_criteria(&mut self, _criteria: &'doc Criteria, _depth: usize) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// One entry of the flattened pre-order traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaNode<'doc> {
    Operator {
        criteria: &'doc Criteria,
        depth: usize,
    },
    Criterion {
        criterion: &'doc Criterion,
        depth: usize,
    },
}

impl CriteriaNode<'_> {
    pub fn depth(&self) -> usize {
        match self {
            CriteriaNode::Operator { depth, .. } | CriteriaNode::Criterion { depth, .. } => *depth,
        }
    }
}

enum Frame<'doc> {
    Enter(&'doc Criteria, usize),
    Exit(&'doc Criteria, usize),
    Leaf(&'doc Criterion, usize),
}

/// Depth-first walker over a criteria tree
///
/// Uses an explicit stack, so neither depth nor fan-out is bounded by the call stack.
pub struct CriteriaWalker;

impl CriteriaWalker {
    /// Walks `root` in pre-order, children in document order
    ///
    /// The root is reported at depth 0.
    pub fn walk<'doc, V>(root: &'doc Criteria, visitor: &mut V) -> ControlFlow<()>
    where
        V: CriteriaVisitor<'doc> + ?Sized,
    {
        let mut stack = vec![Frame::Enter(root, 0)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(criteria, depth) => {
                    visitor.enter_criteria(criteria, depth)?;
                    stack.push(Frame::Exit(criteria, depth));
                    // Reversed so the first child is popped first
                    for child in criteria.children().iter().rev() {
                        stack.push(match child {
                            CriteriaChild::Criteria(sub) => Frame::Enter(sub, depth + 1),
                            CriteriaChild::Criterion(leaf) => Frame::Leaf(leaf, depth + 1),
                        });
                    }
                }
                Frame::Exit(criteria, depth) => visitor.exit_criteria(criteria, depth)?,
                Frame::Leaf(criterion, depth) => visitor.visit_criterion(criterion, depth)?,
            }
        }

        ControlFlow::Continue(())
    }

    /// Flattens the tree into its pre-order node sequence
    pub fn nodes(root: &Criteria) -> Vec<CriteriaNode<'_>> {
        struct Collector<'doc>(Vec<CriteriaNode<'doc>>);

        impl<'doc> CriteriaVisitor<'doc> for Collector<'doc> {
            fn enter_criteria(&mut self, criteria: &'doc Criteria, depth: usize) -> ControlFlow<()> {
                self.0.push(CriteriaNode::Operator { criteria, depth });
                ControlFlow::Continue(())
            }

            fn visit_criterion(&mut self, criterion: &'doc Criterion, depth: usize) -> ControlFlow<()> {
                self.0.push(CriteriaNode::Criterion { criterion, depth });
                ControlFlow::Continue(())
            }
        }

        let mut collector = Collector(Vec::new());
        let _ = Self::walk(root, &mut collector);
        collector.0
    }

    /// Operators in the order the walker meets them
    pub fn operators(root: &Criteria) -> Vec<CriteriaOperator> {
        Self::nodes(root)
            .into_iter()
            .filter_map(|node| match node {
                CriteriaNode::Operator { criteria, .. } => Some(criteria.operator()),
                CriteriaNode::Criterion { .. } => None,
            })
            .collect()
    }
}
