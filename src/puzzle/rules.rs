//! Binairo legality, completeness and propagation: the [`RuleOracle`]
//! implementation driving the generic engine.
//!
//! Two local rule families govern every placement:
//!
//! - **triple rule** — no three consecutive equal values in any row or
//!   column;
//! - **parity rule** — no row or column may hold more than n/2 of either
//!   value.
//!
//! Row/column uniqueness is global and only enforced by the completeness
//! check, once a candidate board is full.

use crate::puzzle::grid::{Bit, Coord, Grid, Move};
use crate::solver::{oracle::RuleOracle, work_list::WorkList};

/// Stateless rule oracle for Binairo/Takuzu grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinairoRules;

impl BinairoRules {
    /// Move-shaped legality check for manual play and other external
    /// callers; equivalent to [`RuleOracle::is_legal`].
    pub fn is_legal_move(&self, grid: &Grid, mv: Move) -> bool {
        self.check_move(grid, mv.row, mv.col, mv.value)
    }

    /// Checks the triple and parity rules for placing `value` at
    /// `(row, col)`. The cell itself may hold a temporary trial value;
    /// only its neighbors and the parity counters are consulted.
    fn check_move(&self, grid: &Grid, row: usize, col: usize, value: Bit) -> bool {
        let n = grid.size();
        let v = Some(value);

        // Triple rule, horizontal: the two cells left, the two cells
        // right, and the straddle around (row, col).
        if col >= 2 && grid.cell(row, col - 1) == v && grid.cell(row, col - 2) == v {
            return false;
        }
        if col < n - 2 && grid.cell(row, col + 1) == v && grid.cell(row, col + 2) == v {
            return false;
        }
        if col > 0 && col < n - 1 && grid.cell(row, col - 1) == v && grid.cell(row, col + 1) == v {
            return false;
        }

        // Triple rule, vertical.
        if row >= 2 && grid.cell(row - 1, col) == v && grid.cell(row - 2, col) == v {
            return false;
        }
        if row < n - 2 && grid.cell(row + 1, col) == v && grid.cell(row + 2, col) == v {
            return false;
        }
        if row > 0 && row < n - 1 && grid.cell(row - 1, col) == v && grid.cell(row + 1, col) == v {
            return false;
        }

        // Parity rule: the placement may not push either axis past n/2.
        if grid.row_count(row, value) + 1 > grid.half() {
            return false;
        }
        if grid.col_count(col, value) + 1 > grid.half() {
            return false;
        }

        true
    }

    /// Single-cell revision for Forward Checking: drops from the domain of
    /// `(row, col)` every value that now fails the local rules. Returns
    /// whether the domain is still non-empty.
    fn revise_cell(&self, grid: &mut Grid, row: usize, col: usize) -> bool {
        for value in Bit::VALUES {
            if grid.domain_allows(row, col, value) && !self.check_move(grid, row, col, value) {
                grid.remove_from_domain(row, col, value);
            }
        }
        grid.domain_size(row, col) > 0
    }

    /// Whether the simultaneous trial placement `xi = x, xj = y` passes the
    /// local rules for both cells. Board cells are written temporarily and
    /// restored; the parity counters are never touched, so each trial value
    /// is checked against the committed counts only.
    fn consistent_pair(&self, grid: &mut Grid, xi: Coord, x: Bit, xj: Coord, y: Bit) -> bool {
        let old_xi = grid.cell(xi.row, xi.col);
        let old_xj = grid.cell(xj.row, xj.col);

        grid.set_cell(xi.row, xi.col, Some(x));
        grid.set_cell(xj.row, xj.col, Some(y));

        let valid = self.check_move(grid, xi.row, xi.col, x)
            && self.check_move(grid, xj.row, xj.col, y);

        grid.set_cell(xi.row, xi.col, old_xi);
        grid.set_cell(xj.row, xj.col, old_xj);
        valid
    }

    /// AC-3 revise: removes from `xi`'s domain every value with no
    /// supporting value left in `xj`'s domain. Returns whether anything
    /// was removed.
    fn revise_arc(&self, grid: &mut Grid, xi: Coord, xj: Coord) -> bool {
        let mut to_remove = Vec::new();

        for x in Bit::VALUES {
            if !grid.domain_allows(xi.row, xi.col, x) {
                continue;
            }
            let supported = Bit::VALUES.into_iter().any(|y| {
                grid.domain_allows(xj.row, xj.col, y) && self.consistent_pair(grid, xi, x, xj, y)
            });
            if !supported {
                to_remove.push(x);
            }
        }

        let revised = !to_remove.is_empty();
        for value in to_remove {
            grid.remove_from_domain(xi.row, xi.col, value);
        }
        revised
    }

    /// Queues every arc `(xi, xk)` for unassigned row/column neighbors
    /// `xk` of `xi`.
    fn push_arcs_from(&self, grid: &Grid, xi: Coord, worklist: &mut WorkList<(Coord, Coord)>) {
        let n = grid.size();
        for k in 0..n {
            if k != xi.col && grid.is_empty_cell(xi.row, k) {
                worklist.push_back((xi, Coord::new(xi.row, k)));
            }
        }
        for k in 0..n {
            if k != xi.row && grid.is_empty_cell(k, xi.col) {
                worklist.push_back((xi, Coord::new(k, xi.col)));
            }
        }
    }

    /// Re-queues the incoming arcs `(xk, xi)` after `xi`'s domain shrank,
    /// skipping the neighbor `xj` that was just revised against.
    fn push_arcs_into(
        &self,
        grid: &Grid,
        xi: Coord,
        xj: Coord,
        worklist: &mut WorkList<(Coord, Coord)>,
    ) {
        let n = grid.size();
        for k in 0..n {
            if k != xi.col && grid.is_empty_cell(xi.row, k) {
                let xk = Coord::new(xi.row, k);
                if xk != xj {
                    worklist.push_back((xk, xi));
                }
            }
        }
        for k in 0..n {
            if k != xi.row && grid.is_empty_cell(k, xi.col) {
                let xk = Coord::new(k, xi.col);
                if xk != xj {
                    worklist.push_back((xk, xi));
                }
            }
        }
    }
}

impl RuleOracle for BinairoRules {
    type State = Grid;
    type Variable = Coord;
    type Value = Bit;

    fn is_complete(&self, grid: &Grid) -> bool {
        let n = grid.size();
        for row in 0..n {
            for col in 0..n {
                if grid.is_empty_cell(row, col) {
                    return false;
                }
            }
        }
        grid.rows_and_cols_unique()
    }

    fn unassigned_variables(&self, grid: &Grid) -> Vec<Coord> {
        let n = grid.size();
        let mut vars = Vec::new();
        for row in 0..n {
            for col in 0..n {
                if grid.is_empty_cell(row, col) {
                    vars.push(Coord::new(row, col));
                }
            }
        }
        vars
    }

    fn is_legal(&self, grid: &Grid, var: Coord, value: Bit) -> bool {
        self.check_move(grid, var.row, var.col, value)
    }

    fn apply(&self, grid: &mut Grid, var: Coord, value: Bit) {
        grid.place(Move::new(var.row, var.col, value));
    }

    fn domain_size(&self, grid: &Grid, var: Coord) -> usize {
        grid.domain_size(var.row, var.col)
    }

    fn degree(&self, grid: &Grid, var: Coord) -> usize {
        let n = grid.size();
        let mut degree = 0;
        for k in 0..n {
            if k != var.col && grid.is_empty_cell(var.row, k) {
                degree += 1;
            }
            if k != var.row && grid.is_empty_cell(k, var.col) {
                degree += 1;
            }
        }
        degree
    }

    fn domain_values(&self, grid: &Grid, var: Coord) -> Vec<Bit> {
        Bit::VALUES
            .into_iter()
            .filter(|&value| grid.domain_allows(var.row, var.col, value))
            .collect()
    }

    fn count_constraints(&self, grid: &mut Grid, var: Coord, value: Bit) -> usize {
        let n = grid.size();
        let mut cost = 0;

        // Trial placement on the board only; counters stay as they are and
        // the cell is restored before returning.
        let old = grid.cell(var.row, var.col);
        grid.set_cell(var.row, var.col, Some(value));

        for c in 0..n {
            if c == var.col || !grid.is_empty_cell(var.row, c) {
                continue;
            }
            for v in Bit::VALUES {
                if grid.domain_allows(var.row, c, v) && !self.check_move(grid, var.row, c, v) {
                    cost += 1;
                }
            }
        }
        for r in 0..n {
            if r == var.row || !grid.is_empty_cell(r, var.col) {
                continue;
            }
            for v in Bit::VALUES {
                if grid.domain_allows(r, var.col, v) && !self.check_move(grid, r, var.col, v) {
                    cost += 1;
                }
            }
        }

        grid.set_cell(var.row, var.col, old);
        cost
    }

    fn forward_check(&self, grid: &mut Grid, last: Coord) -> bool {
        let n = grid.size();
        // First emptied neighbor domain aborts immediately; the remaining
        // neighbors are left unvisited.
        for c in 0..n {
            if grid.is_empty_cell(last.row, c) && !self.revise_cell(grid, last.row, c) {
                return false;
            }
        }
        for r in 0..n {
            if grid.is_empty_cell(r, last.col) && !self.revise_cell(grid, r, last.col) {
                return false;
            }
        }
        true
    }

    fn enforce_arc_consistency(&self, grid: &mut Grid) -> bool {
        let mut worklist: WorkList<(Coord, Coord)> = WorkList::new();

        let n = grid.size();
        for row in 0..n {
            for col in 0..n {
                if grid.is_empty_cell(row, col) {
                    self.push_arcs_from(grid, Coord::new(row, col), &mut worklist);
                }
            }
        }

        while let Some((xi, xj)) = worklist.pop_front() {
            if self.revise_arc(grid, xi, xj) {
                if grid.domain_size(xi.row, xi.col) == 0 {
                    return false;
                }
                self.push_arcs_into(grid, xi, xj, &mut worklist);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn triple_rule_rejects_all_three_horizontal_windows() {
        let rules = BinairoRules;
        // Two to the left: 1 1 _ at columns 0, 1.
        let grid: Grid = "11....\n......\n......\n......\n......\n......".parse().unwrap();
        assert!(!rules.is_legal(&grid, coord(0, 2), Bit::One));
        assert!(rules.is_legal(&grid, coord(0, 2), Bit::Zero));

        // Two to the right: _ 0 0 at columns 3, 4.
        let grid: Grid = "...00.\n......\n......\n......\n......\n......".parse().unwrap();
        assert!(!rules.is_legal(&grid, coord(0, 2), Bit::Zero));
        assert!(rules.is_legal(&grid, coord(0, 2), Bit::One));

        // Straddle: 1 _ 1 at columns 1 and 3.
        let grid: Grid = ".1.1..\n......\n......\n......\n......\n......".parse().unwrap();
        assert!(!rules.is_legal(&grid, coord(0, 2), Bit::One));
        assert!(rules.is_legal(&grid, coord(0, 2), Bit::Zero));
    }

    #[test]
    fn triple_rule_rejects_all_three_vertical_windows() {
        let rules = BinairoRules;
        let grid: Grid = "1.....\n1.....\n......\n......\n......\n......".parse().unwrap();
        assert!(!rules.is_legal(&grid, coord(2, 0), Bit::One));

        let grid: Grid = "......\n......\n......\n0.....\n0.....\n......".parse().unwrap();
        assert!(!rules.is_legal(&grid, coord(2, 0), Bit::Zero));

        let grid: Grid = "......\n1.....\n......\n1.....\n......\n......".parse().unwrap();
        assert!(!rules.is_legal(&grid, coord(2, 0), Bit::One));
    }

    #[test]
    fn is_legal_move_agrees_with_is_legal() {
        let rules = BinairoRules;
        let grid: Grid = "11....\n......\n......\n......\n......\n......".parse().unwrap();
        assert!(!rules.is_legal_move(&grid, Move::new(0, 2, Bit::One)));
        assert!(rules.is_legal_move(&grid, Move::new(0, 2, Bit::Zero)));
    }

    #[test]
    fn triple_rule_is_bounds_guarded_at_the_edges() {
        let rules = BinairoRules;
        let grid = Grid::new(4).unwrap();
        // Corners touch every boundary branch.
        for &value in &Bit::VALUES {
            assert!(rules.is_legal(&grid, coord(0, 0), value));
            assert!(rules.is_legal(&grid, coord(0, 3), value));
            assert!(rules.is_legal(&grid, coord(3, 0), value));
            assert!(rules.is_legal(&grid, coord(3, 3), value));
        }
    }

    #[test]
    fn parity_rule_caps_each_value_at_half() {
        let rules = BinairoRules;
        // Row 0 already holds two 0s (n/2 for n = 4), spaced to avoid the
        // triple rule.
        let grid: Grid = "0.0.\n....\n....\n....".parse().unwrap();
        assert!(!rules.is_legal(&grid, coord(0, 3), Bit::Zero));
        assert!(rules.is_legal(&grid, coord(0, 3), Bit::One));

        // Columns are symmetric.
        let grid: Grid = "0...\n....\n0...\n....".parse().unwrap();
        assert!(!rules.is_legal(&grid, coord(3, 0), Bit::Zero));
        assert!(rules.is_legal(&grid, coord(3, 0), Bit::One));
    }

    #[test]
    fn completeness_requires_fullness_and_uniqueness() {
        let rules = BinairoRules;
        let solved: Grid = "010101\n101010\n011010\n100101\n010110\n101001".parse().unwrap();
        assert!(rules.is_complete(&solved));

        let mut holed = solved.clone();
        holed.clear(0, 0);
        assert!(!rules.is_complete(&holed));

        // Full board with duplicate rows: balanced and triple-free, but
        // rows 0 and 2 coincide (and so do 1 and 3).
        let dup: Grid = "0101\n1010\n0101\n1010".parse().unwrap();
        assert!(!rules.is_complete(&dup));
    }

    #[test]
    fn unassigned_variables_come_in_row_major_order() {
        let rules = BinairoRules;
        let grid: Grid = "0.01\n....\n0101\n10.0".parse().unwrap();
        let vars = rules.unassigned_variables(&grid);
        assert_eq!(vars[0], coord(0, 1));
        assert_eq!(vars.last(), Some(&coord(3, 2)));
        assert!(vars.windows(2).all(|w| (w[0].row, w[0].col) < (w[1].row, w[1].col)));
    }

    #[test]
    fn degree_counts_unassigned_neighbors_on_both_axes() {
        let rules = BinairoRules;
        let grid = Grid::new(6).unwrap();
        // Empty board: 5 row neighbors + 5 column neighbors.
        assert_eq!(rules.degree(&grid, coord(2, 3)), 10);

        let grid: Grid = "0.01\n....\n0101\n10.0".parse().unwrap();
        // (1, 1): row 1 has 3 other empties; column 1 has (0, 1) empty.
        assert_eq!(rules.degree(&grid, coord(1, 1)), 4);
    }

    #[test]
    fn domain_values_respect_the_mask_in_ascending_order() {
        let rules = BinairoRules;
        let mut grid = Grid::new(4).unwrap();
        assert_eq!(rules.domain_values(&grid, coord(0, 0)), vec![Bit::Zero, Bit::One]);
        grid.remove_from_domain(0, 0, Bit::Zero);
        assert_eq!(rules.domain_values(&grid, coord(0, 0)), vec![Bit::One]);
        grid.remove_from_domain(0, 0, Bit::One);
        assert!(rules.domain_values(&grid, coord(0, 0)).is_empty());
    }

    #[test]
    fn count_constraints_restores_the_state_and_ranks_values() {
        let rules = BinairoRules;
        // Row 0: 1 . 1 . . . — another 1 in the row squeezes the zeros.
        let mut grid: Grid = "1.1...\n......\n......\n......\n......\n......".parse().unwrap();
        let before = grid.clone();
        let one_cost = rules.count_constraints(&mut grid, coord(0, 4), Bit::One);
        let zero_cost = rules.count_constraints(&mut grid, coord(0, 4), Bit::Zero);
        assert_eq!(grid, before);
        assert!(
            zero_cost <= one_cost,
            "a third 1 should constrain at least as much as a 0 ({} vs {})",
            zero_cost,
            one_cost
        );
    }

    #[test]
    fn forward_check_prunes_neighbor_domains() {
        let rules = BinairoRules;
        // After placing 1 at (0, 2) next to 1 at (0, 1), cell (0, 0) and
        // (0, 3) can no longer take 1 (triple rule).
        let mut grid: Grid = ".11...\n......\n......\n......\n......\n......".parse().unwrap();
        assert!(rules.forward_check(&mut grid, coord(0, 2)));
        assert!(!grid.domain_allows(0, 0, Bit::One));
        assert!(!grid.domain_allows(0, 3, Bit::One));
        assert!(grid.domain_allows(0, 0, Bit::Zero));
    }

    #[test]
    fn forward_check_fails_fast_on_an_emptied_domain() {
        let rules = BinairoRules;
        // (0, 1) sits between two 0s, so 0 is locally illegal there. With
        // 1 removed by an earlier inference, revising (0, 1) wipes its
        // domain and the check must abort.
        let mut grid: Grid = "0.0...\n......\n0.....\n......\n......\n......".parse().unwrap();
        grid.remove_from_domain(0, 1, Bit::One);
        assert!(!rules.forward_check(&mut grid, coord(0, 0)));
    }

    #[test]
    fn ac3_narrows_domains_without_false_pruning() {
        let rules = BinairoRules;
        // 1 1 _ _ : (0, 2) cannot be 1 (triple); arc consistency must find
        // that without any assignment.
        let mut grid: Grid = "11....\n......\n......\n......\n......\n......".parse().unwrap();
        assert!(rules.enforce_arc_consistency(&mut grid));
        assert!(!grid.domain_allows(0, 2, Bit::One));
        assert!(grid.domain_allows(0, 2, Bit::Zero));
    }

    #[test]
    fn ac3_reports_failure_when_a_domain_wipes_out() {
        let rules = BinairoRules;
        let mut grid: Grid = "0.0...\n......\n0.....\n......\n......\n......".parse().unwrap();
        // Same wipeout as in the forward-checking test: (0, 1) cannot take
        // 0 between two 0s, and 1 was already removed.
        grid.remove_from_domain(0, 1, Bit::One);
        assert!(!rules.enforce_arc_consistency(&mut grid));
    }

    #[test]
    fn apply_goes_through_grid_place() {
        let rules = BinairoRules;
        let mut grid = Grid::new(4).unwrap();
        rules.apply(&mut grid, coord(1, 1), Bit::One);
        assert_eq!(grid.cell(1, 1), Some(Bit::One));
        assert_eq!(grid.row_count(1, Bit::One), 1);
        assert_eq!(grid.domain_size(1, 1), 1);
        assert_eq!(grid, {
            let mut g = Grid::new(4).unwrap();
            g.place(Move::new(1, 1, Bit::One));
            g
        });
    }
}
