//! Centralized limits and thresholds for the autoimport front end.
//!
//! These bound recursive and iterative algorithms so that adversarial input
//! (deeply nested expressions, corrupted parent links) degrades into a
//! diagnostic or an early exit instead of a stack overflow or a hang.

// =============================================================================
// Recursion Depth Limits (Parser)
// =============================================================================

/// Maximum nesting depth for recursive-descent parsing.
///
/// Every nested expression, statement or pattern adds a frame to the parser's
/// call stack. Past this depth the parser reports a diagnostic and stops
/// descending. The value leaves room for the parser frames on a 2 MiB
/// worker thread stack.
///
/// ```javascript
/// // Deeply nested calls or parentheses:
/// f(f(f(f(f(f(f(/* ... */)))))));
/// ((((((((((((((((((((1))))))))))))))))))));
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 256;

// =============================================================================
// Operation Count Limits (Binder / Classifier)
// =============================================================================

/// Maximum number of frames visited when walking a scope chain.
///
/// Scope chains are finite and acyclic by construction; the cap turns a
/// corrupted chain into a "not found" instead of an infinite loop.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Maximum number of parent links followed when walking up from a node.
pub const MAX_PARENT_WALK_ITERATIONS: usize = 100_000;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Upper bound for node pre-allocation derived from source length.
pub const MAX_NODE_PREALLOC: usize = 5_000_000;
