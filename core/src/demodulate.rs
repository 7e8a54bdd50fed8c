//! Phase demodulation, the decoder path of the codec.
//!
//! Two strategies sit behind one contract. The differential comparator is
//! the default: the band-pass filter and the unknown acoustic path do not
//! preserve an absolute phase reference, but consecutive chunks see a
//! near-identical channel, so the phase *change* between neighbours
//! survives where the absolute phase does not. The coherent comparator is
//! kept selectable for controlled setups where absolute phase holds.

use crate::config::ChunkTiming;
use crate::modulate::carrier_chunk;
use crate::waveform::Waveform;

/// How chunk phase is turned back into bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemodStrategy {
    /// Compare each chunk with the previous one; a phase reversal toggles
    /// the output bit.
    #[default]
    Differential,
    /// Compare each chunk against a phase-0 reference carrier; the sign of
    /// the inner product is the bit.
    Coherent,
}

/// Decode `num_bits` payload bits starting at `start_offset`, using the
/// default differential strategy.
///
/// Reads `num_bits + 1` consecutive chunks: the extra leading chunk only
/// seeds the first phase comparison and is never part of the payload.
/// When the waveform runs out of whole chunks the result is simply
/// shorter; that is a boundary condition, not an error.
pub fn demodulate(
    waveform: &Waveform,
    timing: &ChunkTiming,
    start_offset: usize,
    num_bits: usize,
) -> Vec<bool> {
    demodulate_with_strategy(
        waveform,
        timing,
        start_offset,
        num_bits,
        DemodStrategy::Differential,
    )
}

/// [`demodulate`] with an explicit strategy. Both strategies share the
/// `num_bits + 1` chunk contract.
pub fn demodulate_with_strategy(
    waveform: &Waveform,
    timing: &ChunkTiming,
    start_offset: usize,
    num_bits: usize,
    strategy: DemodStrategy,
) -> Vec<bool> {
    let size = timing.chunk_samples();
    let chunks = (0..=num_bits).map_while(move |i| {
        let begin = start_offset + i * size;
        waveform.samples().get(begin..begin + size)
    });

    match strategy {
        DemodStrategy::Differential => differential(chunks, num_bits),
        DemodStrategy::Coherent => coherent(chunks, timing),
    }
}

/// Fold over adjacent chunk pairs: a negative inner product marks a phase
/// reversal and toggles the running bit, which starts at 0 and is emitted
/// for every chunk after the first.
fn differential<'a>(chunks: impl Iterator<Item = &'a [f32]>, num_bits: usize) -> Vec<bool> {
    let mut bits = Vec::with_capacity(num_bits);
    let mut previous: Option<&[f32]> = None;
    let mut current = false;
    for chunk in chunks {
        if let Some(previous) = previous {
            if dot(previous, chunk) < 0.0 {
                current = !current;
            }
            bits.push(current);
        }
        previous = Some(chunk);
    }
    bits
}

fn coherent<'a>(chunks: impl Iterator<Item = &'a [f32]>, timing: &ChunkTiming) -> Vec<bool> {
    let reference = carrier_chunk(timing);
    chunks
        .map(|chunk| dot(&reference, chunk) > 0.0)
        .skip(1) // the leading chunk carries no payload
        .collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
