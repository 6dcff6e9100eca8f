use crate::error::{OptimizeError, Result};
use crate::remnant::RemnantPool;
use crate::types::{MaterialGroup, Piece, ReuseEvent, Rod};

/// Rods cut and remnants reused for one material group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packing {
    pub rods: Vec<Rod>,
    pub reused: Vec<ReuseEvent>,
}

impl Packing {
    pub fn rod_count(&self) -> usize {
        self.rods.len()
    }

    pub fn fresh_length(&self) -> f64 {
        self.rods.iter().map(Rod::used_length).sum()
    }

    pub fn reused_length(&self) -> f64 {
        self.reused.iter().map(|r| r.length).sum()
    }
}

pub struct Packer {
    raw_length: f64,
}

impl Packer {
    pub fn new(raw_length: f64) -> Self {
        Self { raw_length }
    }

    pub fn raw_length(&self) -> f64 {
        self.raw_length
    }

    /// Packs one group: drains pool remnants first, then fills fresh rods.
    /// Closed rods with positive leftover go back into `pool`.
    pub fn pack(&self, group: &MaterialGroup, pool: &mut RemnantPool) -> Result<Packing> {
        if let Some(p) = group.pieces.iter().find(|p| !p.fits_in(self.raw_length)) {
            return Err(OptimizeError::PieceTooLong {
                code: group.code.clone(),
                length: p.length,
                raw_length: self.raw_length,
            });
        }

        let mut pieces = group.pieces.clone();
        sort_descending(&mut pieces);

        let (reused, remaining) = drain_remnants(&group.code, pieces, pool);
        let rods = self.fill_rods(&group.code, remaining, pool);

        tracing::debug!(
            code = %group.code,
            vendor = %group.vendor,
            pieces = group.pieces.len(),
            reused = reused.len(),
            rods = rods.len(),
            "packed material group"
        );

        Ok(Packing { rods, reused })
    }

    fn fill_rods(&self, code: &str, mut remaining: Vec<Piece>, pool: &mut RemnantPool) -> Vec<Rod> {
        sort_descending(&mut remaining);

        let mut rods = Vec::new();
        let mut current = Rod::new(self.raw_length);

        while !remaining.is_empty() {
            // Largest piece that still fits; on an empty rod this is the head.
            match remaining.iter().position(|p| p.fits_in(current.leftover)) {
                Some(idx) => {
                    let piece = remaining.remove(idx);
                    current.cut(piece);
                }
                None => {
                    let full = std::mem::replace(&mut current, Rod::new(self.raw_length));
                    close_rod(code, full, &mut rods, pool);
                }
            }
        }

        if !current.is_empty() {
            close_rod(code, current, &mut rods, pool);
        }
        rods
    }
}

fn sort_descending(pieces: &mut [Piece]) {
    pieces.sort_by(|a, b| b.length.total_cmp(&a.length));
}

fn drain_remnants(
    code: &str,
    pieces: Vec<Piece>,
    pool: &mut RemnantPool,
) -> (Vec<ReuseEvent>, Vec<Piece>) {
    let mut reused = Vec::new();
    let mut remaining = Vec::new();

    for piece in pieces {
        match pool.take(code, piece.length) {
            Some(taken) => reused.push(ReuseEvent {
                remnant_length: taken.length,
                length: piece.length,
                kind: piece.kind,
                remaining: taken.remaining,
            }),
            None => remaining.push(piece),
        }
    }

    (reused, remaining)
}

fn close_rod(code: &str, rod: Rod, rods: &mut Vec<Rod>, pool: &mut RemnantPool) {
    pool.deposit(code, rod.leftover);
    rods.push(rod);
}
