use std::{fmt, str::FromStr};

use self::Move::*;
use crate::constants::*;
use crate::cubie::{Corner::*, CubieCube, Edge::*};
use crate::error::Error;
use crate::load_or_generate;

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// $ clockwise, $2 double, $3 counter-clockwise.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(R),
            "R'" => Ok(R3),
            "R2" => Ok(R2),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "L2" => Ok(L2),
            "U" => Ok(U),
            "U'" => Ok(U3),
            "U2" => Ok(U2),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "D2" => Ok(D2),
            "F" => Ok(F),
            "F'" => Ok(F3),
            "F2" => Ok(F2),
            "B" => Ok(B),
            "B'" => Ok(B3),
            "B2" => Ok(B2),
            _ => Err(Error::InvalidScramble),
        }
    }
}

impl Move {
    /// The face this move turns, 0..6 in U, R, F, D, L, B order.
    pub fn face(self) -> usize {
        self as usize / 3
    }

    pub fn is_same_layer(&self, other: Move) -> bool {
        self.face() == other.face()
    }

    /// Whether `self` may follow `last` in a maneuver. Rejects a second turn
    /// of the same face and the non-canonical ordering of commuting
    /// opposite-face pairs (D before U, L before R, B before F).
    pub fn is_allowed_after(&self, last: Option<Move>) -> bool {
        match last {
            None => true,
            Some(last) => {
                let diff = last as i8 / 3 - *self as i8 / 3;
                diff != 0 && diff != 3
            }
        }
    }

    pub fn get_inverse(self) -> Self {
        match self {
            U => U3,
            U3 => U,
            D => D3,
            D3 => D,
            R => R3,
            R3 => R,
            L => L3,
            L3 => L,
            F => F3,
            F3 => F,
            B => B3,
            B3 => B,
            _ => self,
        }
    }
}

/// The basic six cube moves described by permutations and changes in orientation.
///
/// U_MOVE
pub const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// R_MOVE
pub const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR], //permutation of the corners
    co: [2, 0, 0, 1, 1, 0, 0, 2],                 //changes of the orientations of the corners
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR], //permutation of the edges
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],     //changes of the orientations of the edges
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// F_MOVE
pub const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// D_MOVE
pub const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// L_MOVE
pub const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// B_MOVE
pub const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

/// The six base moves in U, R, F, D, L, B order.
pub const BASIC_MOVES: [CubieCube; 6] = [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE];

lazy_static! {
    /// The 18 move operators in ALL_MOVES order, squares and inverses composed
    /// from the six base moves.
    pub static ref MOVE_CUBES: [CubieCube; 18] = {
        let mut mc = [CubieCube::default(); 18];
        for (i, base) in BASIC_MOVES.iter().enumerate() {
            let mut m = *base;
            for k in 0..3 {
                mc[3 * i + k] = m;
                m = m * *base;
            }
        }
        mc
    };
}

pub struct MoveTables {
    pub twist_move: Vec<u16>,
    pub flip_move: Vec<u16>,
    pub udslice_move: Vec<u16>,
    pub cperm_move: Vec<u16>,
    pub ud_edges_move: Vec<u16>,
    pub udslice_sorted_move: Vec<u16>,
}

impl MoveTables {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            twist_move: move_twist()?,
            flip_move: move_flip()?,
            udslice_move: move_udslice()?,
            cperm_move: move_cperm()?,
            ud_edges_move: move_ud_edges()?,
            udslice_sorted_move: move_udslice_sorted()?,
        })
    }
}

/// Move table for the twists of the corners.
///
/// The twist coordinate describes the 3^7 = 2187 possible orientations of the 8 corners.
///
/// 0 <= twist < 2187 in phase 1, twist = 0 in phase 2
pub fn move_twist() -> Result<Vec<u16>, Error> {
    load_or_generate("move_twist", || {
        let mut a = CubieCube::default();
        let mut twist_move = vec![0; N_TWIST * N_MOVE];
        for i in 0..N_TWIST {
            a.set_twist(i as u16);
            for j in ALL_COLORS {
                // six faces U, R, F, D, L, B
                for k in 0..3 {
                    // three moves for each face, for example U, U2, U3 = U'
                    a.corner_multiply(BASIC_MOVES[j as usize]);
                    twist_move[N_MOVE * i + 3 * j as usize + k] = a.get_twist();
                }
                a.corner_multiply(BASIC_MOVES[j as usize]); // 4. move restores face
            }
        }
        twist_move
    })
}

/// Move table for the flip of the edges.
///
/// The flip coordinate describes the 2^11 = 2048 possible orientations of the 12 edges.
///
/// 0 <= flip < 2048 in phase 1, flip = 0 in phase 2
pub fn move_flip() -> Result<Vec<u16>, Error> {
    load_or_generate("move_flip", || {
        let mut a = CubieCube::default();
        let mut flip_move = vec![0; N_FLIP * N_MOVE];
        for i in 0..N_FLIP {
            a.set_flip(i as u16);
            for j in ALL_COLORS {
                for k in 0..3 {
                    a.edge_multiply(BASIC_MOVES[j as usize]);
                    flip_move[N_MOVE * i + 3 * j as usize + k] = a.get_flip();
                }
                a.edge_multiply(BASIC_MOVES[j as usize]);
            }
        }
        flip_move
    })
}

/// Move table for the location of the four UD-slice edges FR, FL, BL and BR.
///
/// The udslice coordinate describes the Binomial(12,4) = 495 possible
/// locations, ignoring the permutation inside the slice.
///
/// 0 <= udslice < 495 in phase 1, udslice = 0 in phase 2
pub fn move_udslice() -> Result<Vec<u16>, Error> {
    load_or_generate("move_udslice", || {
        let mut a = CubieCube::default();
        let mut udslice_move = vec![0; N_UDSLICE * N_MOVE];
        for i in 0..N_UDSLICE {
            a.set_udslice(i as u16);
            for j in ALL_COLORS {
                for k in 0..3 {
                    a.edge_multiply(BASIC_MOVES[j as usize]);
                    udslice_move[N_MOVE * i + 3 * j as usize + k] = a.get_udslice();
                }
                a.edge_multiply(BASIC_MOVES[j as usize]);
            }
        }
        udslice_move
    })
}

/// Move table for the corner permutation in phase 2.
///
/// The cperm coordinate describes the 8! = 40320 permutations of the corners.
/// Only the ten phase 2 moves are tabulated, in PHASE2_MOVES column order.
pub fn move_cperm() -> Result<Vec<u16>, Error> {
    load_or_generate("move_cperm", || {
        let mut a = CubieCube::default();
        let mut cperm_move = vec![0; N_CPERM * N_MOVE2];
        for i in 0..N_CPERM {
            a.set_cperm(i as u16);
            for (mi, m) in PHASE2_MOVES.iter().enumerate() {
                let mut b = a;
                b.corner_multiply(MOVE_CUBES[*m as usize]);
                cperm_move[N_MOVE2 * i + mi] = b.get_cperm();
            }
        }
        cperm_move
    })
}

/// Move table for the permutation of the eight U and D edges in phase 2.
///
/// Rows are generated from cubes whose UD-slice half of the edge permutation
/// is the identity, so the tabulated moves only ever exchange well-defined
/// edges between the U and D faces.
pub fn move_ud_edges() -> Result<Vec<u16>, Error> {
    load_or_generate("move_ud_edges", || {
        let mut a = CubieCube::default();
        let mut ud_edges_move = vec![0; N_UD_EDGES * N_MOVE2];
        for i in 0..N_UD_EDGES {
            a.set_ud_edges(i as u16);
            for (mi, m) in PHASE2_MOVES.iter().enumerate() {
                let mut b = a;
                b.edge_multiply(MOVE_CUBES[*m as usize]);
                ud_edges_move[N_MOVE2 * i + mi] = b.get_ud_edges();
            }
        }
        ud_edges_move
    })
}

/// Move table for the permutation of the UD-slice edges inside their slice in
/// phase 2. The other eight edge positions hold the identity while the rows
/// are generated.
pub fn move_udslice_sorted() -> Result<Vec<u16>, Error> {
    load_or_generate("move_udslice_sorted", || {
        let mut a = CubieCube::default();
        let mut udslice_sorted_move = vec![0; N_UDSLICE_SORTED * N_MOVE2];
        for i in 0..N_UDSLICE_SORTED {
            a.set_udslice_sorted(i as u16);
            for (mi, m) in PHASE2_MOVES.iter().enumerate() {
                let mut b = a;
                b.edge_multiply(MOVE_CUBES[*m as usize]);
                udslice_sorted_move[N_MOVE2 * i + mi] = b.get_udslice_sorted();
            }
        }
        udslice_sorted_move
    })
}
