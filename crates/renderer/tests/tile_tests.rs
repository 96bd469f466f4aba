//! End-to-end tests for interpolated tile rendering.

use grid_common::{HexColorParser, TileCoord, VisualizationConfig, TILE_SIZE, TRANSPARENT};
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::colorize::{class_index, Colorizer, DOT_COLOR};
use renderer::interpolate::Interpolator;
use renderer::sink::{ImageSink, PixelBuffer, TileSink};
use renderer::tile::{render_tile, TileRenderer};
use renderer::visualization::build_tile_renderer;
use test_utils::fixtures::colors::{BLACK, BLUE, RED, WHITE, WHITE_BLACK};
use test_utils::fixtures::configs;
use test_utils::{constant_grid, gaussian_density_grid, positioned, ramp_grid};

fn rng() -> StdRng {
    StdRng::seed_from_u64(5)
}

fn two_class() -> Colorizer {
    Colorizer::stepped(vec![50.0, 100.0], WHITE_BLACK.to_vec()).unwrap()
}

// ============================================================================
// Native zoom
// ============================================================================

#[test]
fn test_native_zoom_nearest_matches_cells() {
    // 16×16 grid placed 5 cells right and 7 cells down inside tile (3, 2)
    let grid = positioned(ramp_grid(16, 16, 0), 3 * 256 + 5, 2 * 256 + 7, 10);
    let colorizer = two_class();
    let mut sink = PixelBuffer::new();

    render_tile(
        &mut sink,
        &grid,
        Some(Interpolator::Nearest),
        &colorizer,
        TileCoord::new(10, 3, 2),
        &mut rng(),
    );

    for ty in 0..TILE_SIZE {
        for tx in 0..TILE_SIZE {
            let value = grid.value(tx as i64 - 5, ty as i64 - 7);
            let expected = WHITE_BLACK[class_index(value, &[50.0, 100.0])];
            assert_eq!(sink.pixel(tx, ty), expected, "pixel ({}, {})", tx, ty);
        }
    }
    // Both classes actually occur
    assert_eq!(sink.pixel(5, 7), WHITE);
    assert_eq!(sink.pixel(20, 22), BLACK);
}

#[test]
fn test_native_zoom_ignores_configured_interpolator() {
    let grid = ramp_grid(16, 16, 0);
    let renderer = TileRenderer::new(&grid, Some(Interpolator::Bicubic), two_class());
    let nearest = TileRenderer::new(&grid, None, two_class());
    let coord = TileCoord::new(grid.zoom, 0, 0);
    assert_eq!(renderer.render(coord, &mut rng()), nearest.render(coord, &mut rng()));
}

#[test]
fn test_render_overwrites_sink() {
    let grid = ramp_grid(4, 4, 0);
    let transparent_low =
        Colorizer::stepped(vec![50.0, 100.0], vec![TRANSPARENT, BLACK]).unwrap();
    let renderer = TileRenderer::new(&grid, None, transparent_low);

    let mut sink = PixelBuffer::new();
    sink.put(200, 200, RED);
    renderer.render_tile(&mut sink, TileCoord::new(grid.zoom, 0, 0), &mut rng());
    assert_eq!(sink.pixel(200, 200), TRANSPARENT);
}

// ============================================================================
// Zoomed in and out
// ============================================================================

#[test]
fn test_far_tile_is_transparent() {
    let grid = ramp_grid(16, 16, 1);
    let colorizer = Colorizer::stepped(vec![50.0, 100.0], vec![TRANSPARENT, BLACK]).unwrap();
    let renderer = TileRenderer::new(&grid, Some(Interpolator::Bilinear), colorizer);
    let tile = renderer.render(TileCoord::new(grid.zoom + 3, 40, 40), &mut rng());
    assert!(tile.is_transparent());
}

#[test]
fn test_zoomed_out_samples_every_other_cell() {
    let grid = ramp_grid(16, 16, 0);
    let renderer = TileRenderer::new(&grid, None, two_class());
    let tile = renderer.render(TileCoord::new(grid.zoom - 1, 0, 0), &mut rng());

    for ty in 0..8 {
        for tx in 0..8 {
            let value = grid.value(2 * tx as i64, 2 * ty as i64);
            let expected = WHITE_BLACK[class_index(value, &[50.0, 100.0])];
            assert_eq!(tile.pixel(tx, ty), expected, "pixel ({}, {})", tx, ty);
        }
    }
    // Past the grid, value 0 is the first class
    assert_eq!(tile.pixel(100, 100), WHITE);
}

#[test]
fn test_zoomed_in_cells_cover_blocks() {
    let grid = ramp_grid(16, 16, 0);
    let renderer = TileRenderer::new(&grid, None, two_class());
    // Three zooms in: each cell is 8×8 pixels
    let tile = renderer.render(TileCoord::new(grid.zoom + 3, 0, 0), &mut rng());

    for (tx, ty) in [(0, 0), (7, 7), (8, 0), (63, 63), (100, 50)] {
        let value = grid.value(tx as i64 / 8, ty as i64 / 8);
        let expected = WHITE_BLACK[class_index(value, &[50.0, 100.0])];
        assert_eq!(tile.pixel(tx, ty), expected, "pixel ({}, {})", tx, ty);
    }
}

#[test]
fn test_bilinear_constant_interior() {
    let grid = constant_grid(16, 16, 7);
    let colorizer = Colorizer::stepped(vec![5.0, 10.0], vec![RED, BLUE]).unwrap();
    let renderer = TileRenderer::new(&grid, Some(Interpolator::Bilinear), colorizer);
    // 8 pixels per cell; the grid covers pixels 0..128 of tile (0, 0) and
    // the field fades over the outer half cell on every side
    let tile = renderer.render(TileCoord::new(grid.zoom + 3, 0, 0), &mut rng());

    for ty in (4..124).step_by(7) {
        for tx in (4..124).step_by(7) {
            assert_eq!(tile.pixel(tx, ty), BLUE, "pixel ({}, {})", tx, ty);
        }
    }
    assert_eq!(tile.pixel(200, 200), RED);
    assert_eq!(tile.pixel(60, 200), RED);
    // Mirrored pixels just inside opposite edges agree
    assert_eq!(tile.pixel(1, 60), tile.pixel(127, 60));
    assert_eq!(tile.pixel(60, 1), tile.pixel(60, 127));
}

// ============================================================================
// Dot density
// ============================================================================

#[test]
fn test_dot_tile_uses_dilution() {
    let grid = gaussian_density_grid(32, 32, 400.0);
    let renderer = TileRenderer::new(&grid, None, Colorizer::dot());
    assert!(renderer.trimmed_max() > 0.0);

    let tile = renderer.render(TileCoord::new(grid.zoom, 0, 0), &mut rng());
    let lit = tile
        .as_bytes()
        .chunks_exact(4)
        .filter(|px| *px == DOT_COLOR)
        .count();
    assert!(lit > 0);
    // Nothing outside the grid footprint
    for ty in 32..TILE_SIZE {
        for tx in 0..TILE_SIZE {
            assert_eq!(tile.pixel(tx, ty), TRANSPARENT);
        }
    }
}

#[test]
fn test_dot_tile_zero_grid_is_empty() {
    let grid = constant_grid(8, 8, 0);
    let renderer = TileRenderer::new(&grid, None, Colorizer::dot());
    let tile = renderer.render(TileCoord::new(grid.zoom + 2, 0, 0), &mut rng());
    assert!(tile.is_transparent());
}

#[test]
fn test_trimmed_max_override() {
    let grid = constant_grid(8, 8, 3);
    let renderer = TileRenderer::new(&grid, None, Colorizer::dot()).with_trimmed_max(1e9);
    assert_eq!(renderer.trimmed_max(), 1e9);
    let tile = renderer.render(TileCoord::new(grid.zoom, 0, 0), &mut rng());
    // Densities of 3e-9 almost never light a pixel
    let lit = tile.as_bytes().chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(lit <= 1);
}

// ============================================================================
// Sinks and configuration
// ============================================================================

#[test]
fn test_image_sink_receives_pixels() {
    let grid = ramp_grid(16, 16, 0);
    let renderer = TileRenderer::new(&grid, None, two_class());
    let mut sink = ImageSink::new();
    renderer.render_tile(&mut sink, TileCoord::new(grid.zoom, 0, 0), &mut rng());

    assert_eq!(sink.image().get_pixel(0, 0).0, WHITE);
    assert_eq!(sink.image().get_pixel(15, 15).0, BLACK);
    assert!(sink.labels().is_empty());
}

#[test]
fn test_build_from_config() {
    let grid = gaussian_density_grid(64, 64, 500.0);
    let config = VisualizationConfig::from_json(configs::QUANTILE_BLUES).unwrap();
    let renderer = build_tile_renderer(&grid, &config, &HexColorParser).unwrap();

    assert_eq!(renderer.interpolator(), Some(Interpolator::Bicubic));
    assert_eq!(renderer.colorizer().breaks().len(), 5);
    assert_eq!(renderer.colorizer().colors().len(), 5);

    let mut sink = PixelBuffer::new();
    renderer.render_tile(&mut sink, TileCoord::new(grid.zoom + 2, 0, 0), &mut rng());
    assert!(!sink.is_transparent());
}

#[test]
fn test_build_dot_from_config() {
    let grid = gaussian_density_grid(16, 16, 100.0);
    let config = VisualizationConfig::from_json(configs::DOT_DENSITY).unwrap();
    let renderer = build_tile_renderer(&grid, &config, &HexColorParser).unwrap();
    assert!(renderer.colorizer().normalize());
    assert!(renderer.colorizer().breaks().is_empty());
}

#[test]
fn test_build_rejects_degenerate_grid() {
    let grid = constant_grid(4, 4, 1);
    let config = VisualizationConfig::from_json(configs::LOG_EQUAL_INTERVAL).unwrap();
    // Explicit log domain [1, 1000] does not depend on the grid
    assert!(build_tile_renderer(&grid, &config, &HexColorParser).is_ok());

    let linear = VisualizationConfig::from_json(
        r#"{ "classifier": { "type": "equal_interval" }, "colors": ["white", "black"] }"#,
    )
    .unwrap();
    assert!(build_tile_renderer(&grid, &linear, &HexColorParser).is_err());
}

#[test]
fn test_sink_trait_object() {
    let grid = ramp_grid(4, 4, 0);
    let renderer = TileRenderer::new(&grid, None, two_class());
    let mut buffer = PixelBuffer::new();
    let sink: &mut dyn TileSink = &mut buffer;
    renderer.render_tile(sink, TileCoord::new(grid.zoom, 0, 0), &mut rng());
    assert_eq!(buffer.pixel(0, 0), WHITE);
}
