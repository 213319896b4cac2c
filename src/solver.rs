use std::fmt;
use std::time::{Duration, Instant};

use crate::constants::*;
use crate::coord::CoordCube;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::{Move, MoveTables};
use crate::pruning::PruningTables;
use crate::scramble::scramble_from_str;

pub const DEFAULT_MAX_LENGTH: usize = 23;
pub const DEFAULT_TIMEOUT: f64 = 30.0;

/// A solution maneuver together with the split between the two phases:
/// `moves[..phase1_length]` drives the cube into G1, the rest solves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub phase1_length: usize,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .moves
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{s}")
    }
}

/// Two phase solver owning its move and pruning tables.
///
/// The tables are read-only after construction, so one instance can serve any
/// number of consecutive `solve` calls; each call keeps its own search state.
pub struct Solver {
    mv: MoveTables,
    pr: PruningTables,
}

impl Solver {
    /// Load or generate all tables. The first construction per cache version
    /// performs the offline table generation.
    pub fn new() -> Result<Self, Error> {
        let mv = MoveTables::new()?;
        let pr = PruningTables::new(&mv)?;
        Ok(Self { mv, pr })
    }

    /// Find a maneuver of at most `max_length` moves for the given cube.
    ///
    /// Returns `Ok(None)` when the wall-clock budget of `timeout` seconds runs
    /// out before any solution is found. The first solution found is returned.
    pub fn solve(
        &self,
        cc: &CubieCube,
        max_length: usize,
        timeout: f64,
    ) -> Result<Option<Solution>, Error> {
        cc.verify()?;
        if cc.is_solved() {
            return Ok(Some(Solution {
                moves: vec![],
                phase1_length: 0,
            }));
        }

        let co = CoordCube::from_cubie(cc)?;
        let mut search = Search {
            mv: &self.mv,
            pr: &self.pr,
            cube: *cc,
            deadline: Instant::now() + Duration::from_secs_f64(timeout),
            max_length,
            sofar_phase1: Vec::with_capacity(max_length),
            sofar_phase2: Vec::with_capacity(max_length),
            solution: None,
        };

        // iterative deepening over the phase 1 length; phase 1 must reach G1
        // with exactly `togo1` moves, longer prefixes can enable shorter tails
        for togo1 in 0..=max_length {
            search.sofar_phase1.clear();
            if search.phase1_search(co.twist, co.flip, co.udslice, togo1) {
                break;
            }
        }
        Ok(search.solution)
    }
}

/// State of one solve call: the DFS move stacks and the first solution found.
struct Search<'a> {
    mv: &'a MoveTables,
    pr: &'a PruningTables,
    cube: CubieCube,
    deadline: Instant,
    max_length: usize,
    sofar_phase1: Vec<Move>,
    sofar_phase2: Vec<Move>,
    solution: Option<Solution>,
}

impl<'a> Search<'a> {
    /// Lower bound on the number of moves needed to reach G1.
    fn phase1_prune(&self, twist: u16, flip: u16, udslice: u16) -> u8 {
        let d1 = self.pr.flip_udslice_prune[N_UDSLICE * flip as usize + udslice as usize];
        let d2 = self.pr.twist_udslice_prune[N_UDSLICE * twist as usize + udslice as usize];
        d1.max(d2)
    }

    /// Lower bound on the number of moves needed to solve a G1 cube.
    fn phase2_prune(&self, cperm: u16, ud_edges: u16, udslice_sorted: u16) -> u8 {
        let d1 = self.pr.cperm_udslice_prune
            [N_UDSLICE_SORTED * cperm as usize + udslice_sorted as usize];
        let d2 = self.pr.ud_edges_udslice_prune
            [N_UDSLICE_SORTED * ud_edges as usize + udslice_sorted as usize];
        d1.max(d2)
    }

    /// Depth-exact DFS towards G1. Returns true when the search is finished,
    /// either because a solution was stored or the deadline expired.
    fn phase1_search(&mut self, twist: u16, flip: u16, udslice: u16, togo: usize) -> bool {
        if Instant::now() > self.deadline {
            return true;
        }
        if togo == 0 {
            if twist == SOLVED && flip == SOLVED && udslice == SOLVED {
                return self.phase2_start();
            }
            return false;
        }
        if self.phase1_prune(twist, flip, udslice) as usize > togo {
            return false;
        }
        for m in ALL_MOVES {
            if !m.is_allowed_after(self.sofar_phase1.last().copied()) {
                continue;
            }
            let twist1 = self.mv.twist_move[N_MOVE * twist as usize + m as usize];
            let flip1 = self.mv.flip_move[N_MOVE * flip as usize + m as usize];
            let udslice1 = self.mv.udslice_move[N_MOVE * udslice as usize + m as usize];

            self.sofar_phase1.push(m);
            let finished = self.phase1_search(twist1, flip1, udslice1, togo - 1);
            self.sofar_phase1.pop();
            if finished {
                return true;
            }
        }
        false
    }

    /// Set up phase 2 at a G1 leaf of phase 1. The cubie cube is touched only
    /// here, to extract the three phase 2 coordinates after the phase 1 prefix.
    fn phase2_start(&mut self) -> bool {
        if Instant::now() > self.deadline {
            return true;
        }
        let cc = self.cube.apply_moves(&self.sofar_phase1);
        let cperm = cc.get_cperm();
        let ud_edges = cc.get_ud_edges();
        let udslice_sorted = cc.get_udslice_sorted();

        if cperm == SOLVED && ud_edges == SOLVED && udslice_sorted == SOLVED {
            self.solution = Some(Solution {
                moves: self.sofar_phase1.clone(),
                phase1_length: self.sofar_phase1.len(),
            });
            return true;
        }

        for togo2 in 1..=(self.max_length - self.sofar_phase1.len()) {
            self.sofar_phase2.clear();
            if self.phase2_search(cperm, ud_edges, udslice_sorted, togo2) {
                return true;
            }
        }
        false
    }

    /// Depth-exact DFS inside G1 using the ten phase 2 moves.
    fn phase2_search(
        &mut self,
        cperm: u16,
        ud_edges: u16,
        udslice_sorted: u16,
        togo: usize,
    ) -> bool {
        if Instant::now() > self.deadline {
            return true;
        }
        if togo == 0 {
            if cperm == SOLVED && ud_edges == SOLVED && udslice_sorted == SOLVED {
                let mut moves = self.sofar_phase1.clone();
                moves.extend_from_slice(&self.sofar_phase2);
                self.solution = Some(Solution {
                    moves,
                    phase1_length: self.sofar_phase1.len(),
                });
                return true;
            }
            return false;
        }
        if self.phase2_prune(cperm, ud_edges, udslice_sorted) as usize > togo {
            return false;
        }
        for (mi, &m) in PHASE2_MOVES.iter().enumerate() {
            // the move filter reaches across the phase boundary: the first
            // phase 2 move is checked against the last phase 1 move
            let last = self
                .sofar_phase2
                .last()
                .or(self.sofar_phase1.last())
                .copied();
            if !m.is_allowed_after(last) {
                continue;
            }
            let cperm1 = self.mv.cperm_move[N_MOVE2 * cperm as usize + mi];
            let ud_edges1 = self.mv.ud_edges_move[N_MOVE2 * ud_edges as usize + mi];
            let udslice_sorted1 =
                self.mv.udslice_sorted_move[N_MOVE2 * udslice_sorted as usize + mi];

            self.sofar_phase2.push(m);
            let finished = self.phase2_search(cperm1, ud_edges1, udslice_sorted1, togo - 1);
            self.sofar_phase2.pop();
            if finished {
                return true;
            }
        }
        false
    }
}

lazy_static! {
    static ref SOLVER: Solver = Solver::new().expect("table generation failed");
}

/// Force loading/generation of all tables up front instead of on first solve.
pub fn initialize() {
    lazy_static::initialize(&SOLVER);
}

/// Solve a cube given as a 54-character facelet string. Interior whitespace is
/// ignored.
pub fn solve(facelets: &str, max_length: usize, timeout: f64) -> Result<Option<Solution>, Error> {
    let stripped: String = facelets.chars().filter(|c| !c.is_whitespace()).collect();
    let fc = FaceCube::try_from(stripped.as_str())?;
    let cc = CubieCube::try_from(&fc)?;
    SOLVER.solve(&cc, max_length, timeout)
}

/// Solve a cube given at the cubie level.
pub fn solve_cube(
    cc: &CubieCube,
    max_length: usize,
    timeout: f64,
) -> Result<Option<Solution>, Error> {
    SOLVER.solve(cc, max_length, timeout)
}

/// Solve the cube produced by applying a scramble like "R U' F2" to the
/// solved cube.
pub fn solve_from_moves(
    scramble: &str,
    max_length: usize,
    timeout: f64,
) -> Result<Option<Solution>, Error> {
    let moves = scramble_from_str(scramble)?;
    let cc = CubieCube::from(&moves[..]);
    SOLVER.solve(&cc, max_length, timeout)
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::constants::PHASE2_MOVES;
    use crate::cubie::CubieCube;
    use crate::error::Error;
    use crate::moves::Move;
    use crate::scramble::{gen_scramble, scramble_from_str};
    use crate::solver::*;

    fn assert_solves(cc: &CubieCube, solution: &Solution) {
        assert!(cc.apply_moves(&solution.moves).is_solved());
        assert!(solution.phase1_length <= solution.moves.len());
        for m in &solution.moves[solution.phase1_length..] {
            assert!(PHASE2_MOVES.contains(m));
        }
    }

    #[test]
    fn test_solve_solved_cube() {
        let solution = solve_cube(&CubieCube::default(), DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT)
            .unwrap()
            .unwrap();
        assert_eq!(solution.moves, vec![]);
        assert_eq!(solution.phase1_length, 0);
    }

    #[test]
    fn test_solve_single_move() {
        let cc = CubieCube::default().apply_move(Move::U);
        let solution = solve_cube(&cc, DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT)
            .unwrap()
            .unwrap();
        assert_eq!(solution.moves, vec![Move::U3]);
        assert_solves(&cc, &solution);
    }

    #[test]
    fn test_solve_cancelling_scramble() {
        let cc = CubieCube::default()
            .apply_move(Move::U)
            .apply_move(Move::U3);
        let solution = solve_cube(&cc, DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT)
            .unwrap()
            .unwrap();
        assert_eq!(solution.moves, vec![]);
        assert_eq!(solution.phase1_length, 0);
    }

    #[test]
    fn test_solve_short_scramble() {
        let solution = solve_from_moves("U R F", DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT)
            .unwrap()
            .unwrap();
        assert!(solution.moves.len() <= 12);
        let cc = CubieCube::from(&scramble_from_str("U R F").unwrap()[..]);
        assert_solves(&cc, &solution);
    }

    #[test]
    fn test_solve_long_scramble() {
        let s = "R U F D L B R' U' F' D' L' B' R2 U2 F2 D2";
        let solution = solve_from_moves(s, DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT)
            .unwrap()
            .unwrap();
        assert!(solution.moves.len() <= DEFAULT_MAX_LENGTH);
        let cc = CubieCube::from(&scramble_from_str(s).unwrap()[..]);
        assert_solves(&cc, &solution);
    }

    #[test]
    fn test_solve_solved_facelets() {
        let solution = solve(
            "UUUUUUUUU RRRRRRRRR FFFFFFFFF DDDDDDDDD LLLLLLLLL BBBBBBBBB",
            DEFAULT_MAX_LENGTH,
            DEFAULT_TIMEOUT,
        )
        .unwrap()
        .unwrap();
        assert_eq!(solution.moves, vec![]);
        assert_eq!(solution.phase1_length, 0);
    }

    #[test]
    fn test_solve_facelet_string() {
        let faces = "DRBLUURLDRBLRRBFLFFUBFFDRUDURRBDFBBULDUDLUDLBUFFDBFLRL";
        let solution = solve(faces, DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT)
            .unwrap()
            .unwrap();
        let cc = CubieCube::from_facelets(faces).unwrap();
        assert_solves(&cc, &solution);
    }

    #[test]
    fn test_solve_random_scrambles() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..5 {
            let (cc, _) = gen_scramble(&mut rng, 20);
            let solution = solve_cube(&cc, DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT)
                .unwrap()
                .expect("scramble of length 20 should be solvable in the budget");
            assert!(solution.moves.len() <= DEFAULT_MAX_LENGTH);
            assert_solves(&cc, &solution);
        }
    }

    #[test]
    fn test_solve_timeout_returns_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let (cc, _) = gen_scramble(&mut rng, 20);
        // an expired budget unwinds the search without a solution
        let result = solve_cube(&cc, DEFAULT_MAX_LENGTH, 0.0).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_solve_rejects_invalid_cube() {
        let mut cc = CubieCube::default();
        cc.co[0] = 1;
        assert!(matches!(
            solve_cube(&cc, DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT),
            Err(Error::TwistError)
        ));
    }

    #[test]
    fn test_solution_display() {
        let solution = Solution {
            moves: vec![Move::R, Move::U3, Move::F2],
            phase1_length: 2,
        };
        assert_eq!(solution.to_string(), "R U' F2");
    }
}
