use crate::core::Side;

/// 駒の種類. The discriminant is the low three bits of the packed cell code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

/// 移動の特性
#[derive(Debug, Clone, Copy)]
pub enum MoveStep {
    Step(i8, i8),  // one cell at the given (row, col) offset
    Slide(i8, i8), // repeat the offset until blocked
}

const ROOK_RAYS: [MoveStep; 4] = [
    MoveStep::Slide(1, 0),
    MoveStep::Slide(-1, 0),
    MoveStep::Slide(0, 1),
    MoveStep::Slide(0, -1),
];

const BISHOP_RAYS: [MoveStep; 4] = [
    MoveStep::Slide(1, 1),
    MoveStep::Slide(1, -1),
    MoveStep::Slide(-1, 1),
    MoveStep::Slide(-1, -1),
];

const QUEEN_RAYS: [MoveStep; 8] = [
    MoveStep::Slide(1, 0),
    MoveStep::Slide(-1, 0),
    MoveStep::Slide(0, 1),
    MoveStep::Slide(0, -1),
    MoveStep::Slide(1, 1),
    MoveStep::Slide(1, -1),
    MoveStep::Slide(-1, 1),
    MoveStep::Slide(-1, -1),
];

const KING_STEPS: [MoveStep; 8] = [
    MoveStep::Step(1, 0),
    MoveStep::Step(-1, 0),
    MoveStep::Step(0, 1),
    MoveStep::Step(0, -1),
    MoveStep::Step(1, 1),
    MoveStep::Step(1, -1),
    MoveStep::Step(-1, 1),
    MoveStep::Step(-1, -1),
];

const KNIGHT_STEPS: [MoveStep; 8] = [
    MoveStep::Step(2, 1),
    MoveStep::Step(2, -1),
    MoveStep::Step(-2, 1),
    MoveStep::Step(-2, -1),
    MoveStep::Step(1, 2),
    MoveStep::Step(-1, 2),
    MoveStep::Step(1, -2),
    MoveStep::Step(-1, -2),
];

/// 駒の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    /// 4-bit cell code: bit 3 is the side, bits 0-2 the kind. Zero is an empty cell.
    pub(crate) fn code(self) -> u64 {
        let side_bit = match self.side {
            Side::First => 0,
            Side::Second => 8,
        };
        side_bit | self.kind as u64
    }

    pub(crate) fn from_code(code: u64) -> Option<Piece> {
        let side = if code & 8 == 0 {
            Side::First
        } else {
            Side::Second
        };
        let kind = match code & 7 {
            1 => PieceKind::Pawn,
            2 => PieceKind::Knight,
            3 => PieceKind::Bishop,
            4 => PieceKind::Rook,
            5 => PieceKind::Queen,
            6 => PieceKind::King,
            _ => return None,
        };
        Some(Piece { kind, side })
    }

    /// その駒が本来持っている「動きの定義」を返す
    ///
    /// Pawns move and capture differently, so their moves are generated
    /// separately and this returns nothing for them.
    pub fn movement_rules(&self) -> &'static [MoveStep] {
        match self.kind {
            PieceKind::Pawn => &[],
            PieceKind::Knight => &KNIGHT_STEPS,
            PieceKind::Bishop => &BISHOP_RAYS,
            PieceKind::Rook => &ROOK_RAYS,
            PieceKind::Queen => &QUEEN_RAYS,
            PieceKind::King => &KING_STEPS,
        }
    }

    pub fn display_char(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match self.side {
            Side::First => c,
            Side::Second => c.to_ascii_lowercase(),
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let side = if c.is_ascii_uppercase() {
            Side::First
        } else {
            Side::Second
        };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some(Piece { kind, side })
    }
}
