use std::fmt;

use crate::constants::*;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::{Move, MoveTables};

/// Placeholder for the phase 2 coordinates while the cube is still in phase 1.
pub const INVALID: u16 = 65535;

/// Represent a cube on the coordinate level.
///
/// In phase 1 a state is uniquely determined by the three coordinates twist,
/// flip and udslice.
///
/// In phase 2 a state is uniquely determined by the three coordinates cperm,
/// ud_edges and udslice_sorted.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CoordCube {
    pub twist: u16,          // corner orientation, < 2187
    pub flip: u16,           // edge orientation, < 2048
    pub udslice: u16,        // location of the FR, FL, BL, BR edges, < 495
    pub cperm: u16,          // corner permutation, < 40320
    pub ud_edges: u16,       // permutation of the U and D edges, < 40320, phase 2 only
    pub udslice_sorted: u16, // permutation inside the UD-slice, < 24, phase 2 only
}

impl Default for CoordCube {
    fn default() -> Self {
        Self {
            twist: 0,
            flip: 0,
            udslice: 0,
            cperm: 0,
            ud_edges: 0,
            udslice_sorted: 0,
        }
    }
}

impl fmt::Display for CoordCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(twist: {}, flip: {}, udslice: {}, cperm: {}, ud_edges: {}, udslice_sorted: {})",
            self.twist, self.flip, self.udslice, self.cperm, self.ud_edges, self.udslice_sorted
        )
    }
}

impl CoordCube {
    /// Build a CoordCube from a validated CubieCube.
    ///
    /// The edge permutation coordinates of phase 2 are only defined once the
    /// UD-slice edges sit in their slice; outside of that subgroup they are
    /// set to INVALID.
    pub fn from_cubie(cc: &CubieCube) -> Result<Self, Error> {
        cc.verify()?;

        let udslice = cc.get_udslice();
        let (ud_edges, udslice_sorted) = match udslice {
            SOLVED => (cc.get_ud_edges(), cc.get_udslice_sorted()),
            _ => (INVALID, INVALID),
        };
        Ok(Self {
            twist: cc.get_twist(),
            flip: cc.get_flip(),
            udslice,
            cperm: cc.get_cperm(),
            ud_edges,
            udslice_sorted,
        })
    }

    /// Update the phase 1 coordinates for a move.
    ///
    /// The phase 2 coordinates are not tracked through phase 1 moves; they are
    /// recomputed from the cubie cube when phase 2 starts.
    pub fn phase1_move(&mut self, mv: &MoveTables, m: Move) {
        self.twist = mv.twist_move[N_MOVE * self.twist as usize + m as usize];
        self.flip = mv.flip_move[N_MOVE * self.flip as usize + m as usize];
        self.udslice = mv.udslice_move[N_MOVE * self.udslice as usize + m as usize];
        self.cperm = INVALID;
        self.ud_edges = INVALID;
        self.udslice_sorted = INVALID;
    }

    /// Update the phase 2 coordinates for the move at position `mi` of
    /// PHASE2_MOVES. Valid only while the cube stays in G1.
    pub fn phase2_move(&mut self, mv: &MoveTables, mi: usize) {
        self.cperm = mv.cperm_move[N_MOVE2 * self.cperm as usize + mi];
        self.ud_edges = mv.ud_edges_move[N_MOVE2 * self.ud_edges as usize + mi];
        self.udslice_sorted =
            mv.udslice_sorted_move[N_MOVE2 * self.udslice_sorted as usize + mi];
    }
}
