//! PNG encoding for finished tiles.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the tile has ≤256 distinct
//!   colors, which is every stepped or dot tile.
//! - **RGBA PNG (color type 6)**: fallback for gradient and interpolated tiles
//!   with more colors.

use crate::sink::PixelBuffer;
use grid_common::{Rgba, VizError, VizResult, TILE_SIZE};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::Write;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096;

/// Encode a rendered tile.
pub fn encode_tile(buffer: &PixelBuffer) -> VizResult<Vec<u8>> {
    encode_auto(buffer.as_bytes(), TILE_SIZE, TILE_SIZE)
}

/// Encode RGBA pixels, choosing indexed output when the palette fits.
pub fn encode_auto(pixels: &[u8], width: usize, height: usize) -> VizResult<Vec<u8>> {
    check_len(pixels, width, height)?;
    match extract_palette(pixels) {
        Some((palette, indices)) => encode_indexed(width, height, &palette, &indices),
        None => encode_rgba(pixels, width, height),
    }
}

/// Encode RGBA pixels as color type 6.
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> VizResult<Vec<u8>> {
    check_len(pixels, width, height)?;

    let mut png = PNG_SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &header(width, height, 6));
    write_chunk(&mut png, b"IDAT", &deflate_rows(pixels, width * 4)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode palette indices as color type 3.
pub fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[Rgba],
    indices: &[u8],
) -> VizResult<Vec<u8>> {
    if indices.len() != width * height {
        return Err(VizError::Encoding(format!(
            "expected {} palette indices, got {}",
            width * height,
            indices.len()
        )));
    }

    let mut png = PNG_SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &header(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only when some entry is not opaque
    if palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    write_chunk(&mut png, b"IDAT", &deflate_rows(indices, width)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn check_len(pixels: &[u8], width: usize, height: usize) -> VizResult<()> {
    if pixels.len() != width * height * 4 {
        return Err(VizError::Encoding(format!(
            "expected {} bytes for {}x{} RGBA, got {}",
            width * height * 4,
            width,
            height,
            pixels.len()
        )));
    }
    Ok(())
}

fn header(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    // bit depth, color type, compression, filter, interlace
    ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);
    ihdr
}

#[inline(always)]
fn pack(px: &[u8]) -> u32 {
    u32::from_le_bytes([px[0], px[1], px[2], px[3]])
}

/// Sorted palette plus one index per pixel, or `None` past 256 colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<Rgba>, Vec<u8>)> {
    let parallel = pixels.len() / 4 >= PARALLEL_THRESHOLD;

    let distinct: HashSet<u32> = if parallel {
        pixels.par_chunks_exact(4).map(pack).collect()
    } else {
        pixels.chunks_exact(4).map(pack).collect()
    };
    if distinct.len() > MAX_PALETTE_SIZE {
        return None;
    }

    let mut packed: Vec<u32> = distinct.into_iter().collect();
    packed.sort_unstable();
    let lookup: HashMap<u32, u8> = packed
        .iter()
        .enumerate()
        .map(|(i, c)| (*c, i as u8))
        .collect();

    let index_of = |px: &[u8]| lookup.get(&pack(px)).copied().unwrap_or(0);
    let indices: Vec<u8> = if parallel {
        pixels.par_chunks_exact(4).map(index_of).collect()
    } else {
        pixels.chunks_exact(4).map(index_of).collect()
    };

    let palette = packed.into_iter().map(u32::to_le_bytes).collect();
    Some((palette, indices))
}

/// Zlib-compress scanlines, each prefixed with filter type 0.
fn deflate_rows(data: &[u8], row_len: usize) -> VizResult<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    for row in data.chunks(row_len.max(1)) {
        encoder
            .write_all(&[0])
            .and_then(|_| encoder.write_all(row))
            .map_err(|e| VizError::Encoding(format!("IDAT compression failed: {}", e)))?;
    }
    encoder
        .finish()
        .map_err(|e| VizError::Encoding(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut crc = crc32fast::Hasher::new();
    crc.update(chunk_type);
    crc.update(data);
    png.extend_from_slice(&crc.finalize().to_be_bytes());
}
