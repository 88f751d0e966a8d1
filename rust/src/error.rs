//! Error handling and result types for RBTree operations.
//!
//! Every fallible operation reports to its immediate caller; nothing is
//! swallowed. The one recovery performed internally is the ordering rebuild
//! rollback in `ordering.rs`, which restores the previous tree before the
//! error is returned.

/// Error type for red-black tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RBTreeError {
    /// Strict lookup missed and no default applies.
    KeyNotFound,
    /// Operation between trees with incompatible duplicate policies.
    IncompatibleOperand(String),
    /// Malformed argument (stale node id, bad record, ...).
    InvalidArgument(String),
    /// Structural insert attempted while a traversal guard is active.
    IllegalMutation(String),
    /// The tree cannot be written in the flat record layout.
    SerializationRefused(String),
    /// A replacement ordering is not a total order.
    OrderingViolation(String),
    /// Red-black or ordering invariant violated.
    CorruptedTree(String),
}

impl RBTreeError {
    /// Create an IncompatibleOperand error with context
    pub fn incompatible(operation: &str, details: &str) -> Self {
        Self::IncompatibleOperand(format!("{}: {}", operation, details))
    }

    /// Create an InvalidArgument error with context
    pub fn invalid_argument(argument: &str, details: &str) -> Self {
        Self::InvalidArgument(format!("{}: {}", argument, details))
    }

    /// Create an IllegalMutation error with context
    pub fn illegal_mutation(operation: &str) -> Self {
        Self::IllegalMutation(format!("can't {} during iteration", operation))
    }

    /// Create a SerializationRefused error with context
    pub fn serialization_refused(reason: &str) -> Self {
        Self::SerializationRefused(format!("cannot dump tree: {}", reason))
    }

    /// Create an OrderingViolation error with context
    pub fn ordering_violation(position: usize, details: &str) -> Self {
        Self::OrderingViolation(format!("entry {}: {}", position, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound)
    }

    pub fn is_incompatible(&self) -> bool {
        matches!(self, Self::IncompatibleOperand(_))
    }

    pub fn is_illegal_mutation(&self) -> bool {
        matches!(self, Self::IllegalMutation(_))
    }

    pub fn is_serialization_refused(&self) -> bool {
        matches!(self, Self::SerializationRefused(_))
    }

    pub fn is_ordering_violation(&self) -> bool {
        matches!(self, Self::OrderingViolation(_))
    }
}

impl std::fmt::Display for RBTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RBTreeError::KeyNotFound => write!(f, "Key not found in tree"),
            RBTreeError::IncompatibleOperand(msg) => write!(f, "Incompatible operand: {}", msg),
            RBTreeError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            RBTreeError::IllegalMutation(msg) => write!(f, "Illegal mutation: {}", msg),
            RBTreeError::SerializationRefused(msg) => write!(f, "Serialization refused: {}", msg),
            RBTreeError::OrderingViolation(msg) => write!(f, "Ordering violation: {}", msg),
            RBTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for RBTreeError {}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, RBTreeError>;

/// Public result type for tree operations that may fail
pub type RBTreeResult<T> = Result<T, RBTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, RBTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, RBTreeError>;

/// Result extension trait for improved error handling
pub trait RBTreeResultExt<T> {
    /// Prefix the error message with additional context
    fn with_context(self, context: &str) -> RBTreeResult<T>;

    /// Prefix the error message with the failing operation's name
    fn with_operation(self, operation: &str) -> RBTreeResult<T>;
}

impl<T> RBTreeResultExt<T> for Result<T, RBTreeError> {
    fn with_context(self, context: &str) -> RBTreeResult<T> {
        self.map_err(|e| match e {
            RBTreeError::KeyNotFound => RBTreeError::KeyNotFound,
            RBTreeError::IncompatibleOperand(msg) => RBTreeError::incompatible(context, &msg),
            RBTreeError::InvalidArgument(msg) => RBTreeError::invalid_argument(context, &msg),
            RBTreeError::IllegalMutation(msg) => {
                RBTreeError::IllegalMutation(format!("{}: {}", context, msg))
            }
            RBTreeError::SerializationRefused(msg) => {
                RBTreeError::SerializationRefused(format!("{}: {}", context, msg))
            }
            RBTreeError::OrderingViolation(msg) => {
                RBTreeError::OrderingViolation(format!("{}: {}", context, msg))
            }
            RBTreeError::CorruptedTree(msg) => RBTreeError::corrupted_tree(context, &msg),
        })
    }

    fn with_operation(self, operation: &str) -> RBTreeResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }
}
