use std::fmt;
use std::str::FromStr;

/// Boolean operator joining the children of a criteria node
///
/// Mirrors the OVAL `OperatorEnumeration`. There is deliberately no `Default`:
/// a criteria node without an operator is rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriteriaOperator {
    /// Every child must hold
    And,
    /// At least one child must hold
    Or,
    /// Exactly one child must hold
    One,
    /// An odd number of children must hold
    Xor,
}

impl CriteriaOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriteriaOperator::And => "AND",
            CriteriaOperator::Or => "OR",
            CriteriaOperator::One => "ONE",
            CriteriaOperator::Xor => "XOR",
        }
    }
}

impl FromStr for CriteriaOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(CriteriaOperator::And),
            "OR" => Ok(CriteriaOperator::Or),
            "ONE" => Ok(CriteriaOperator::One),
            "XOR" => Ok(CriteriaOperator::Xor),
            _ => Err(format!(
                "Invalid criteria operator: '{}'. Expected one of AND, OR, ONE, XOR",
                s
            )),
        }
    }
}

impl fmt::Display for CriteriaOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criterion leaf: a pointer into the tests collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    test_ref: String,
    comment: String,
    negate: bool,
}

impl Criterion {
    pub fn new(test_ref: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            test_ref: test_ref.into(),
            comment: comment.into(),
            negate: false,
        }
    }

    pub fn with_negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    pub fn test_ref(&self) -> &str {
        &self.test_ref
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn negate(&self) -> bool {
        self.negate
    }
}

/// A child of a criteria node, kept in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaChild {
    Criteria(Criteria),
    Criterion(Criterion),
}

/// Recursive criteria node
///
/// Each node exclusively owns its children, so the structure is a rooted tree by
/// construction. Sub-trees and leaves share one ordered child list because OVAL
/// producers interleave them and the order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    operator: CriteriaOperator,
    children: Vec<CriteriaChild>,
    negate: bool,
    comment: Option<String>,
}

impl Criteria {
    pub fn new(operator: CriteriaOperator, children: Vec<CriteriaChild>) -> Self {
        Self {
            operator,
            children,
            negate: false,
            comment: None,
        }
    }

    pub fn with_negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn operator(&self) -> CriteriaOperator {
        self.operator
    }

    pub fn children(&self) -> &[CriteriaChild] {
        &self.children
    }

    /// Child criteria nodes in document order
    pub fn criteria(&self) -> impl Iterator<Item = &Criteria> {
        self.children.iter().filter_map(|child| match child {
            CriteriaChild::Criteria(criteria) => Some(criteria),
            CriteriaChild::Criterion(_) => None,
        })
    }

    /// Criterion leaves directly under this node in document order
    pub fn criterions(&self) -> impl Iterator<Item = &Criterion> {
        self.children.iter().filter_map(|child| match child {
            CriteriaChild::Criterion(criterion) => Some(criterion),
            CriteriaChild::Criteria(_) => None,
        })
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts criterion leaves in the whole sub-tree
    pub fn criterion_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            for child in &node.children {
                match child {
                    CriteriaChild::Criteria(criteria) => pending.push(criteria),
                    CriteriaChild::Criterion(_) => count += 1,
                }
            }
        }
        count
    }
}

// Tear down nested sub-trees from a worklist; the derived drop glue would
// recurse once per nesting level.
impl Drop for Criteria {
    fn drop(&mut self) {
        let mut pending: Vec<Criteria> = Vec::new();
        collect_subtrees(&mut self.children, &mut pending);
        while let Some(mut node) = pending.pop() {
            collect_subtrees(&mut node.children, &mut pending);
        }
    }
}

fn collect_subtrees(children: &mut Vec<CriteriaChild>, pending: &mut Vec<Criteria>) {
    for child in children.drain(..) {
        if let CriteriaChild::Criteria(criteria) = child {
            pending.push(criteria);
        }
    }
}
