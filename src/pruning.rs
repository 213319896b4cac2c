use crate::constants::*;
use crate::error::Error;
use crate::load_or_generate;
use crate::moves::MoveTables;

/// Sentinel for entries the breadth-first sweep has not reached yet. No entry
/// keeps it once a table is fully generated.
const UNVISITED: u8 = 0xff;

/// The pruning tables cut the search tree during the search.
///
/// Each table is indexed by a coordinate pair `a * N_b + b` and stores the
/// exact number of moves needed to bring that pair to (0, 0). The maximum of
/// the two applicable table values is an admissible lower bound for the
/// remaining moves of the phase.
pub struct PruningTables {
    pub flip_udslice_prune: Vec<u8>,
    pub twist_udslice_prune: Vec<u8>,
    pub cperm_udslice_prune: Vec<u8>,
    pub ud_edges_udslice_prune: Vec<u8>,
}

impl PruningTables {
    pub fn new(mv: &MoveTables) -> Result<Self, Error> {
        Ok(Self {
            flip_udslice_prune: prune_flip_udslice(mv)?,
            twist_udslice_prune: prune_twist_udslice(mv)?,
            cperm_udslice_prune: prune_cperm_udslice(mv)?,
            ud_edges_udslice_prune: prune_ud_edges_udslice(mv)?,
        })
    }
}

/// Phase 1 pruning table over flip x udslice, 2048 * 495 entries, all 18 moves.
pub fn prune_flip_udslice(mv: &MoveTables) -> Result<Vec<u8>, Error> {
    load_or_generate("prune_flip_udslice", || {
        bfs_sweep(N_FLIP, N_UDSLICE, &mv.flip_move, &mv.udslice_move, N_MOVE)
    })
}

/// Phase 1 pruning table over twist x udslice, 2187 * 495 entries, all 18 moves.
pub fn prune_twist_udslice(mv: &MoveTables) -> Result<Vec<u8>, Error> {
    load_or_generate("prune_twist_udslice", || {
        bfs_sweep(N_TWIST, N_UDSLICE, &mv.twist_move, &mv.udslice_move, N_MOVE)
    })
}

/// Phase 2 pruning table over cperm x udslice_sorted, 40320 * 24 entries,
/// phase 2 moves only.
pub fn prune_cperm_udslice(mv: &MoveTables) -> Result<Vec<u8>, Error> {
    load_or_generate("prune_cperm_udslice", || {
        bfs_sweep(
            N_CPERM,
            N_UDSLICE_SORTED,
            &mv.cperm_move,
            &mv.udslice_sorted_move,
            N_MOVE2,
        )
    })
}

/// Phase 2 pruning table over ud_edges x udslice_sorted, 40320 * 24 entries,
/// phase 2 moves only.
pub fn prune_ud_edges_udslice(mv: &MoveTables) -> Result<Vec<u8>, Error> {
    load_or_generate("prune_ud_edges_udslice", || {
        bfs_sweep(
            N_UD_EDGES,
            N_UDSLICE_SORTED,
            &mv.ud_edges_move,
            &mv.udslice_sorted_move,
            N_MOVE2,
        )
    })
}

/// Breadth-first distance fill over the product of two coordinates, starting
/// from the goal pair (0, 0). `move_a` and `move_b` are the move tables of the
/// two coordinates, both `n_move` columns wide. Every pair is reachable from
/// the goal under the corresponding move set, so the sweep runs until the
/// whole table is filled.
fn bfs_sweep(n_a: usize, n_b: usize, move_a: &[u16], move_b: &[u16], n_move: usize) -> Vec<u8> {
    let mut table = vec![UNVISITED; n_a * n_b];
    table[0] = 0;
    let mut done = 1;
    let mut depth = 0;
    while done < table.len() {
        for a in 0..n_a {
            for b in 0..n_b {
                if table[n_b * a + b] == depth {
                    for m in 0..n_move {
                        let a1 = move_a[n_move * a + m] as usize;
                        let b1 = move_b[n_move * b + m] as usize;
                        let idx1 = n_b * a1 + b1;
                        if table[idx1] == UNVISITED {
                            table[idx1] = depth + 1;
                            done += 1;
                        }
                    }
                }
            }
        }
        depth += 1;
    }
    table
}

#[cfg(test)]
mod test {
    use crate::constants::*;
    use crate::moves::MoveTables;
    use crate::pruning::*;

    fn check_table(table: &[u8], len: usize) {
        assert_eq!(table.len(), len);
        // the goal pair is at distance 0 and the sweep reached every entry
        assert_eq!(table[0], 0);
        assert!(table.iter().all(|&d| d != UNVISITED));
        assert!(*table.iter().max().unwrap() <= 20);
    }

    #[test]
    fn test_phase1_prune_tables() {
        let mv = MoveTables::new().unwrap();
        let flip_udslice = prune_flip_udslice(&mv).unwrap();
        check_table(&flip_udslice, N_FLIP * N_UDSLICE);
        let twist_udslice = prune_twist_udslice(&mv).unwrap();
        check_table(&twist_udslice, N_TWIST * N_UDSLICE);
    }

    #[test]
    fn test_phase2_prune_tables() {
        let mv = MoveTables::new().unwrap();
        let cperm_udslice = prune_cperm_udslice(&mv).unwrap();
        check_table(&cperm_udslice, N_CPERM * N_UDSLICE_SORTED);
        let ud_edges_udslice = prune_ud_edges_udslice(&mv).unwrap();
        check_table(&ud_edges_udslice, N_UD_EDGES * N_UDSLICE_SORTED);
    }

    #[test]
    fn test_prune_values_are_move_consistent() {
        // neighbouring entries differ by at most one move
        let mv = MoveTables::new().unwrap();
        let table = prune_cperm_udslice(&mv).unwrap();
        for a in (0..N_CPERM).step_by(397) {
            for b in 0..N_UDSLICE_SORTED {
                let d = table[N_UDSLICE_SORTED * a + b] as i32;
                for m in 0..N_MOVE2 {
                    let a1 = mv.cperm_move[N_MOVE2 * a + m] as usize;
                    let b1 = mv.udslice_sorted_move[N_MOVE2 * b + m] as usize;
                    let d1 = table[N_UDSLICE_SORTED * a1 + b1] as i32;
                    assert!((d - d1).abs() <= 1);
                }
            }
        }
    }
}
