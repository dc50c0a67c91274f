/// The seam between the generic backtracking engine and a concrete puzzle.
///
/// An oracle owns every puzzle-specific judgement: which cells are still
/// variables, which assignments are legal, how constrained a variable is,
/// and how to propagate an assignment through the remaining domains. The
/// engine only orchestrates: it orders variables and values through these
/// methods, clones states, and recurses.
///
/// Propagation methods mutate the state they are given (they narrow domain
/// masks in place) and report failure as `false`; the engine discards the
/// mutated clone on failure, so a partial revision never leaks into a live
/// branch.
pub trait RuleOracle {
    /// One search node's worth of puzzle state, independently owned per
    /// branch.
    type State: Clone;
    /// A variable of the CSP.
    type Variable: Copy + Eq;
    /// A value assignable to a variable.
    type Value: Copy + Eq;

    /// True iff every variable is assigned and all global constraints hold.
    fn is_complete(&self, state: &Self::State) -> bool;

    /// All unassigned variables, in the puzzle's canonical enumeration
    /// order (the engine's unheuristic baseline picks the first).
    fn unassigned_variables(&self, state: &Self::State) -> Vec<Self::Variable>;

    /// Whether assigning `value` to `var` violates any local rule right now.
    fn is_legal(&self, state: &Self::State, var: Self::Variable, value: Self::Value) -> bool;

    /// Applies the assignment, keeping all derived state (counters,
    /// domains) in sync.
    fn apply(&self, state: &mut Self::State, var: Self::Variable, value: Self::Value);

    /// Current domain size of `var`.
    fn domain_size(&self, state: &Self::State, var: Self::Variable) -> usize;

    /// Number of unassigned variables sharing a constraint with `var`.
    fn degree(&self, state: &Self::State, var: Self::Variable) -> usize;

    /// Values still allowed for `var`, in ascending order.
    fn domain_values(&self, state: &Self::State, var: Self::Variable) -> Vec<Self::Value>;

    /// LCV metric: how many (neighbor, value) options would assigning
    /// `value` to `var` rule out. The state is borrowed mutably for a
    /// temporary trial placement but is restored before returning.
    fn count_constraints(
        &self,
        state: &mut Self::State,
        var: Self::Variable,
        value: Self::Value,
    ) -> usize;

    /// Forward Checking from the variable just assigned. Returns `false`
    /// as soon as any neighbor's domain empties.
    fn forward_check(&self, state: &mut Self::State, last: Self::Variable) -> bool;

    /// Full arc consistency over all unassigned variables. Returns `false`
    /// if any domain empties; `true` means arc-consistent, not necessarily
    /// solvable.
    fn enforce_arc_consistency(&self, state: &mut Self::State) -> bool;
}
