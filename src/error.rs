use thiserror::Error;

use crate::cubie::{Corner, Edge};

/// Errors.
///
/// Facelet errors carry the offending facelet index or cubie position, cube
/// errors name the violated invariant. A search timeout is not an error: the
/// solver returns `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("facelet string must be 54 characters, got {0}")]
    InvalidFaceletLength(usize),
    #[error("invalid color character `{1}` at facelet {0}")]
    InvalidColor(usize, char),
    #[error("every color must appear on exactly 9 facelets")]
    InvalidColorCount,
    #[error("no corner cubie matches the facelets at {0}")]
    InvalidCornerFacelet(Corner),
    #[error("no edge cubie matches the facelets at {0}")]
    InvalidEdgeFacelet(Edge),
    #[error("not all 8 corners exist exactly once")]
    InvalidCornerPerm,
    #[error("not all 12 edges exist exactly once")]
    InvalidEdgePerm,
    #[error("one corner has to be twisted")]
    TwistError,
    #[error("one edge has to be flipped")]
    FlipError,
    #[error("two corners or two edges have to be exchanged")]
    ParityError,
    #[error("invalid scramble string")]
    InvalidScramble,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),
    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),
}
