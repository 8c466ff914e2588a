#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use itertools::Itertools;
    use varisat::Var;

    use crate::connectivity::is_connected;
    use crate::encoder::encode;
    use crate::grid::{Grid, GridError};
    use crate::location::{Location, Orientation};
    use crate::logic::{exactly, Assignment, ClauseStatus};
    use crate::model::{EdgeId, IslandId, Span};
    use crate::render::render;
    use crate::search::{Budget, Deadline, NodeBudget, Search, SolverFailure, Strategy, Unbounded};
    use crate::solution::{Bridges, Solution, Violation};

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    fn ends(model: &crate::model::PuzzleModel) -> Vec<(usize, usize)> {
        model.edges().iter().map(|edge| (edge.ends().0.get(), edge.ends().1.get())).collect_vec()
    }

    fn solution(pairs: &[((usize, usize), Bridges)]) -> Solution {
        pairs.iter().map(|((a, b), bridges)| ((IslandId(*a), IslandId(*b)), *bridges)).collect()
    }

    const CORNERS: &str = "1,0,1\n0,0,0\n1,0,1";
    const PLUS: &str = "0,1,0\n1,0,1\n0,1,0";
    const SQUARE: &str = "2,0,2\n0,0,0\n2,0,2";

    #[test]
    fn parse_grid() {
        let parsed = grid(" 1, 0 ,2\n\n0,0,0\n");
        assert_eq!(parsed.dims(), (2, 3));
        assert_eq!(parsed.get(Location(0, 2)), Some(2));
        assert_eq!(parsed.get(Location(1, 1)), Some(0));
        assert_eq!(parsed.get(Location(2, 0)), None);
    }

    #[test]
    fn reject_bad_grids() {
        assert!(matches!("".parse::<Grid>(), Err(GridError::Empty)));
        assert!(matches!("1,0\n1".parse::<Grid>(), Err(GridError::Ragged { row: 1, expected: 2, found: 1 })));
        assert!(matches!("1,x".parse::<Grid>(), Err(GridError::NotAnInteger { row: 0, col: 1, .. })));
        assert!(matches!("1,-1".parse::<Grid>(), Err(GridError::NotAnInteger { row: 0, col: 1, .. })));
        assert!(matches!("0,9".parse::<Grid>(), Err(GridError::OutOfRange { row: 0, col: 1, value: 9 })));
        assert!(matches!(Grid::from_rows(vec![vec![]]), Err(GridError::Empty)));
    }

    #[test]
    fn islands_numbered_in_row_major_order() {
        let model = encode(&grid("0,3,0\n2,0,1"));
        let islands = model.islands().iter()
            .map(|island| (island.id().get(), island.location(), island.degree()))
            .collect_vec();
        assert_eq!(islands, vec![
            (1, Location(0, 1), 3),
            (2, Location(1, 0), 2),
            (3, Location(1, 2), 1),
        ]);
    }

    #[test]
    fn scan_stops_at_first_island() {
        let model = encode(&grid("1,0,2,0,1"));
        assert_eq!(ends(&model), vec![(1, 2), (2, 3)]);
        assert!(model.edge_between(IslandId(1), IslandId(3)).is_none());
        assert_eq!(model.edge_between(IslandId(3), IslandId(2)).map(|edge| edge.id()), Some(EdgeId(1)));
    }

    #[test]
    fn edges_on_wide_grid() {
        let model = encode(&grid("1,0,1,0,1\n0,0,0,0,0\n1,0,0,0,1"));
        assert_eq!(ends(&model), vec![(1, 2), (1, 4), (2, 3), (3, 5), (4, 5)]);
        assert!(model.incident(IslandId(2)).iter().all(|edge| model.edge(*edge).span().orientation == Orientation::Horizontal));
    }

    #[test]
    fn adjacent_islands_are_not_candidates() {
        let model = encode(&grid("1,1,0,1"));
        // island 2 blocks island 1, and sees island 3
        assert_eq!(ends(&model), vec![(2, 3)]);
        assert!(model.has_empty_clause());
    }

    #[test]
    fn diagonals_are_never_candidates() {
        let model = encode(&grid(CORNERS));
        assert_eq!(ends(&model), vec![(1, 2), (1, 3), (2, 4), (3, 4)]);
        assert!(model.edge_between(IslandId(1), IslandId(4)).is_none());
        assert!(model.edge_between(IslandId(2), IslandId(3)).is_none());
        assert_eq!(model.edge(EdgeId(0)).span(), Span { orientation: Orientation::Horizontal, line: 0, start: 0, end: 2 });
        assert_eq!(model.edge(EdgeId(1)).span(), Span { orientation: Orientation::Vertical, line: 0, start: 0, end: 2 });
    }

    #[test]
    fn incident_edges_touch_their_island() {
        let model = encode(&grid(CORNERS));
        for island in model.islands() {
            let incident = model.incident(island.id());
            assert_eq!(incident.len(), 2);
            assert!(incident.iter().all(|edge| model.edge(*edge).touches(island.id())));
        }
        assert_eq!(model.incident(IslandId(1)).to_vec(), vec![EdgeId(0), EdgeId(1)]);
    }

    #[test]
    fn spans_cross_only_strictly_inside() {
        let horizontal = Span { orientation: Orientation::Horizontal, line: 1, start: 0, end: 2 };
        let vertical = Span { orientation: Orientation::Vertical, line: 1, start: 0, end: 2 };
        assert!(horizontal.crosses(&vertical));
        assert!(vertical.crosses(&horizontal));

        // sharing an endpoint island
        let corner = Span { orientation: Orientation::Vertical, line: 0, start: 1, end: 3 };
        assert!(!horizontal.crosses(&corner));

        let parallel = Span { orientation: Orientation::Horizontal, line: 1, start: 0, end: 4 };
        assert!(!horizontal.crosses(&parallel));

        assert_eq!(horizontal.interior().collect_vec(), vec![Location(1, 1)]);
    }

    #[test]
    fn crossing_edges_get_exclusion_clause() {
        let model = encode(&grid(PLUS));
        assert_eq!(ends(&model), vec![(1, 4), (2, 3)]);

        let exclusion = vec![Var::from_index(0).negative(), Var::from_index(2).negative()];
        assert!(model.clauses().contains(&exclusion));
        assert_eq!(model.clauses().last(), Some(&exclusion));
    }

    #[test]
    fn exactly_blocks_every_wrong_count() {
        let (a, b) = (Var::from_index(0).positive(), Var::from_index(1).positive());
        assert_eq!(exactly(1, &[a, b]), vec![vec![a, b], vec![!a, !b]]);
        assert_eq!(exactly(2, &[a, b]), vec![vec![a, b], vec![a, !b], vec![!a, b]]);
        assert_eq!(exactly(3, &[a, b, Var::from_index(2).positive()]).len(), 7);
    }

    #[test]
    fn clause_counts() {
        // one implication, and two blocking clauses per island
        let model = encode(&grid("1,0,1"));
        assert_eq!(model.var_count(), 2);
        assert_eq!(model.clauses().len(), 5);
        assert_eq!(model.clauses()[0], vec![Var::from_index(1).negative(), Var::from_index(0).positive()]);
    }

    #[test]
    fn isolated_island_gets_empty_clause() {
        let model = encode(&grid("1,0,0\n0,0,0\n0,0,1"));
        assert!(model.edges().is_empty());
        assert_eq!(model.clauses().iter().filter(|clause| clause.is_empty()).count(), 2);
    }

    #[test]
    fn encoding_is_idempotent() {
        let puzzle = grid("2,0,2,0,1\n0,0,0,0,0\n4,0,3,0,0\n0,0,0,0,0\n3,0,4,0,1");
        let (first, second) = (encode(&puzzle), encode(&puzzle));
        assert_eq!(first.islands(), second.islands());
        assert_eq!(first.edges(), second.edges());
        assert_eq!(first.clauses(), second.clauses());
    }

    #[test]
    fn decision_order_prefers_constrained_vars() {
        // the single-bridge variables also appear in the crossing clause
        let model = encode(&grid(PLUS));
        assert_eq!(model.decision_order(), vec![0, 2, 1, 3].into_iter().map(Var::from_index).collect_vec());
    }

    #[test]
    fn clause_status_under_partial_assignment() {
        let (a, b) = (Var::from_index(0), Var::from_index(1));
        let clause = vec![a.positive(), b.negative()];
        let mut assignment = Assignment::unassigned(2);
        assert_eq!(assignment.status(&clause), ClauseStatus::Open);

        assert!(assignment.set(a.negative()));
        assert_eq!(assignment.status(&clause), ClauseStatus::Unit(b.negative()));
        assert!(!assignment.set(a.positive()));

        assert!(assignment.set(b.positive()));
        assert_eq!(assignment.status(&clause), ClauseStatus::Falsified);
        assert!(assignment.is_total());
        assert_eq!(assignment.unsatisfied_count(&[clause]), None);
    }

    #[test]
    fn decode_assignment() {
        let model = encode(&grid("2,0,2,0,1"));
        let mut assignment = Assignment::unassigned(model.var_count());
        let (first, second) = (model.edge_vars(EdgeId(0)), model.edge_vars(EdgeId(1)));
        assignment.set(first.single.positive());
        assignment.set(first.double.positive());
        assignment.set(second.single.negative());

        let decoded = Solution::decode(&model, &assignment);
        assert_eq!(decoded.bridges(IslandId(2), IslandId(1)), Some(Bridges::Double));
        assert_eq!(decoded.bridges(IslandId(2), IslandId(3)), None);
        assert_eq!(decoded.degree_of(IslandId(2)), 2);
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn connectivity() {
        let model = encode(&grid(CORNERS));
        assert!(is_connected(&[], &Solution::default()));
        assert!(is_connected(&model.islands()[..1], &Solution::default()));
        assert!(!is_connected(model.islands(), &Solution::default()));

        let matching = solution(&[((1, 2), Bridges::Single), ((3, 4), Bridges::Single)]);
        assert!(!is_connected(model.islands(), &matching));

        let path = solution(&[((1, 2), Bridges::Single), ((1, 3), Bridges::Double), ((3, 4), Bridges::Single)]);
        assert!(is_connected(model.islands(), &path));
    }

    #[test]
    fn check_reports_violations() {
        let corners = encode(&grid(CORNERS));
        assert_eq!(
            corners.check(&solution(&[((1, 4), Bridges::Single)])),
            Err(Violation::UnknownEdge(IslandId(1), IslandId(4))),
        );
        assert_eq!(
            corners.check(&solution(&[((1, 2), Bridges::Double)])),
            Err(Violation::Degree { island: IslandId(1), expected: 1, found: 2 }),
        );
        assert_eq!(
            corners.check(&solution(&[((1, 2), Bridges::Single), ((3, 4), Bridges::Single)])),
            Err(Violation::Disconnected),
        );

        let plus = encode(&grid(PLUS));
        assert_eq!(
            plus.check(&solution(&[((1, 4), Bridges::Single), ((2, 3), Bridges::Single)])),
            Err(Violation::Crossing(EdgeId(0), EdgeId(1))),
        );

        let square = encode(&grid(SQUARE));
        let cycle = solution(&[
            ((1, 2), Bridges::Single),
            ((1, 3), Bridges::Single),
            ((2, 4), Bridges::Single),
            ((3, 4), Bridges::Single),
        ]);
        assert_eq!(square.check(&cycle), Ok(()));
    }

    #[test]
    fn render_bridges() {
        let square = grid(SQUARE);
        let model = encode(&square);
        let cycle = solution(&[
            ((1, 2), Bridges::Single),
            ((1, 3), Bridges::Single),
            ((2, 4), Bridges::Single),
            ((3, 4), Bridges::Single),
        ]);
        let rendering = render(&square, &model, &cycle);
        assert_eq!(rendering.rows(), vec!["2-2", "|0|", "2-2"]);
        assert_eq!(rendering.to_string(), "[\"2\", \"-\", \"2\"]
[\"|\", \"0\", \"|\"]
[\"2\", \"-\", \"2\"]
");

        let column = grid("2\n0\n0\n2");
        let model = encode(&column);
        let rendering = render(&column, &model, &solution(&[((1, 2), Bridges::Double)]));
        assert_eq!(rendering.rows(), vec!["2", "$", "$", "2"]);

        let row = grid("2,0,2");
        let model = encode(&row);
        assert_eq!(render(&row, &model, &solution(&[((1, 2), Bridges::Double)])).rows(), vec!["2=2"]);
    }

    #[test]
    fn node_budget_runs_out() {
        let mut budget = NodeBudget::new(2);
        assert!(budget.tick().is_ok());
        assert!(budget.tick().is_ok());
        assert!(matches!(budget.tick(), Err(SolverFailure::Interrupted)));
    }

    #[test]
    fn exhausted_budget_interrupts_every_strategy() {
        let model = encode(&grid(SQUARE));
        for strategy in [Strategy::Complete, Strategy::BestFirst, Strategy::Backtracking, Strategy::Exhaustive] {
            let result = strategy.search(&model, &mut NodeBudget::new(0));
            assert!(matches!(result, Err(SolverFailure::Interrupted)), "{} was not interrupted", strategy);
        }
    }

    #[test]
    fn passed_deadline_interrupts_every_strategy() {
        let model = encode(&grid(SQUARE));
        for strategy in [Strategy::Complete, Strategy::BestFirst, Strategy::Backtracking, Strategy::Exhaustive] {
            let result = strategy.search(&model, &mut Deadline::after(Duration::ZERO));
            assert!(matches!(result, Err(SolverFailure::Interrupted)), "{} was not interrupted", strategy);
        }
    }

    #[test]
    fn combined_budget_stops_at_first_limit() {
        let mut budget = (NodeBudget::new(1), Unbounded);
        assert!(budget.tick().is_ok());
        assert!(matches!(budget.tick(), Err(SolverFailure::Interrupted)));

        let mut budget = (Unbounded, Deadline::after(Duration::ZERO));
        assert!(matches!(budget.tick(), Err(SolverFailure::Interrupted)));
    }

    #[test]
    fn write_rendering_to_nested_path() {
        let grid = grid(SQUARE);
        let model = encode(&grid);
        let solved = solution(&[
            ((1, 2), Bridges::Single),
            ((1, 3), Bridges::Single),
            ((2, 4), Bridges::Single),
            ((3, 4), Bridges::Single),
        ]);
        let rendering = render(&grid, &model, &solved);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("nested").join("square.txt");
        rendering.write_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, rendering.to_string());
        assert_eq!(written, "[\"2\", \"-\", \"2\"]\n[\"|\", \"0\", \"|\"]\n[\"2\", \"-\", \"2\"]\n");
    }

    #[test]
    fn strategy_names() {
        assert_eq!("sat".parse::<Strategy>().unwrap(), Strategy::Complete);
        assert_eq!("ASTAR".parse::<Strategy>().unwrap(), Strategy::BestFirst);
        assert_eq!("dpll".parse::<Strategy>().unwrap(), Strategy::Backtracking);
        assert_eq!("exhaustive".parse::<Strategy>().unwrap(), Strategy::Exhaustive);
        assert!("greedy".parse::<Strategy>().is_err());
        assert_eq!(Strategy::BestFirst.to_string(), "best-first");
    }
}
