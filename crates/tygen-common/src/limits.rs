//! Centralized limits and thresholds.
//!
//! Shared constants for recursion depth budgets, draw sizes, and campaign
//! defaults used throughout the workspace. Centralizing them prevents
//! duplicate definitions with inconsistent values and documents the
//! rationale for each limit.

// =============================================================================
// Recursive generation
// =============================================================================

/// Maximum unfolding depth for recursive types.
///
/// A recursive type such as `tree :: nil | {integer, tree}` is generated by
/// depth-bounded unfolding: leaves at depth zero, then each extra level
/// substitutes the previous level's generator into the self-referential
/// holes. Four levels keeps terms small enough to print in counterexamples
/// while still exercising nesting.
pub const MAX_RECURSIVE_GEN_DEPTH: u32 = 4;

/// Desired total size hint handed to the recursive combinator.
pub const RECURSIVE_GEN_TARGET_SIZE: u32 = 16;

/// Expected branch factor hint handed to the recursive combinator.
pub const RECURSIVE_GEN_BRANCH_SIZE: u32 = 4;

/// Maximum cross-module resolution depth.
///
/// Remote references are resolved by re-entering the build pipeline for the
/// referenced module. Mutually recursive remote types would re-enter
/// forever; past this depth the build fails with `InfiniteType`.
pub const MAX_REMOTE_DEPTH: u32 = 16;

/// Maximum inlining depth for local user-type references.
///
/// Indirect local recursion that never passes through the definition being
/// built (`a :: b`, `b :: b | nil` built from `a`) cannot be rewritten into
/// a base case; inlining stops here and reports `InfiniteType`.
pub const MAX_INLINE_DEPTH: u32 = 32;

// =============================================================================
// Validator recursion
// =============================================================================

/// Maximum self-reference depth while validating one term.
///
/// Well-formed recursive predicates descend into a strictly smaller subterm
/// before hitting the self-reference again, so depth tracks term depth. A
/// degenerate alternative that self-references without consuming structure
/// would otherwise loop; past this depth the predicate answers `false`,
/// keeping validators total.
pub const MAX_VALIDATOR_DEPTH: u32 = 256;

/// Red-zone bytes for growing the stack before a deep recursive walk.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Bytes added per stack growth when the red zone is hit.
pub const STACK_GROW_SIZE: usize = 1024 * 1024;

// =============================================================================
// Draw sizes
// =============================================================================

/// Maximum element count for variable-length sequences (lists, open map
/// entries, bitstring bytes). Nested containers multiply, so this stays
/// small.
pub const MAX_CONTAINER_LEN: usize = 8;

/// Maximum element count for wildcard tuples. Tuples of arbitrary terms are
/// scaled down further than ordinary containers.
pub const MAX_TUPLE_ANY_LEN: usize = 4;

/// Maximum repetitions of the `unit` block when generating sized binary
/// patterns (`<<_:size, _:_*unit>>`).
pub const MAX_BINARY_PATTERN_REPEATS: u32 = 8;

/// Maximum atom name length (drawn alphanumeric, first character a letter).
pub const MAX_ATOM_LEN: usize = 12;

// =============================================================================
// Weighted choices
// =============================================================================

/// Weight of the integer alternative when drawing `timeout()`.
pub const TIMEOUT_INT_WEIGHT: u32 = 9;

/// Weight of the `:infinity` alternative when drawing `timeout()`.
pub const TIMEOUT_INFINITY_WEIGHT: u32 = 1;

// =============================================================================
// Spec-check campaigns
// =============================================================================

/// Default number of argument tuples drawn per overload.
pub const DEFAULT_CHECK_CASES: u32 = 100;

/// Default shrink iteration budget when a counterexample is found.
pub const DEFAULT_MAX_SHRINK_ITERS: u32 = 1_024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_bias_toward_integers() {
        assert!(TIMEOUT_INT_WEIGHT > TIMEOUT_INFINITY_WEIGHT);
    }

    #[test]
    fn test_tuple_any_scaled_below_containers() {
        assert!(MAX_TUPLE_ANY_LEN <= MAX_CONTAINER_LEN);
    }
}
