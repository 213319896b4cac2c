use std::str::FromStr;

use rand::Rng;

use crate::constants::{ALL_MOVES, N_MOVE};
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::Move;

pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

pub fn scramble_to_str(s: &[Move]) -> String {
    s.iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate a random scramble of `n_moves` moves and the cube it produces.
///
/// Two consecutive moves never turn the same face, so the sequence does not
/// trivially collapse.
pub fn gen_scramble<R: Rng>(rng: &mut R, n_moves: usize) -> (CubieCube, Vec<Move>) {
    let mut cc = CubieCube::default();
    let mut moves: Vec<Move> = Vec::with_capacity(n_moves);
    while moves.len() < n_moves {
        let m = ALL_MOVES[rng.gen_range(0..N_MOVE)];
        if let Some(&last) = moves.last() {
            if m.is_same_layer(last) {
                continue;
            }
        }
        cc = cc.apply_move(m);
        moves.push(m);
    }
    (cc, moves)
}

/// Random scramble of `n_moves` moves from the thread-local generator.
pub fn scramble(n_moves: usize) -> (CubieCube, Vec<Move>) {
    gen_scramble(&mut rand::thread_rng(), n_moves)
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cubie::CubieCube;
    use crate::moves::Move::*;

    #[test]
    fn test_scramble_from_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap(), m);
        assert!(scramble_from_str("R U X").is_err());
    }

    #[test]
    fn test_scramble_to_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_to_str(&m), "R U R' U' F L' D' B2 R' U'");
    }

    #[test]
    fn test_gen_scramble() {
        let mut rng = StdRng::seed_from_u64(42);
        let (cc, moves) = gen_scramble(&mut rng, 20);
        assert_eq!(moves.len(), 20);
        for w in moves.windows(2) {
            assert!(!w[0].is_same_layer(w[1]));
        }
        assert_eq!(CubieCube::default().apply_moves(&moves), cc);
        assert!(cc.verify().is_ok());
    }
}
