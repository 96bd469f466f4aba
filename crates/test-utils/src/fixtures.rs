//! Common fixtures for renderer tests.

/// Color ramps.
pub mod colors {
    use grid_common::Rgba;

    pub const WHITE: Rgba = [255, 255, 255, 255];
    pub const BLACK: Rgba = [0, 0, 0, 255];
    pub const RED: Rgba = [255, 0, 0, 255];
    pub const BLUE: Rgba = [0, 0, 255, 255];

    /// Two opaque classes.
    pub const WHITE_BLACK: [Rgba; 2] = [WHITE, BLACK];

    /// Five-class sequential blues.
    pub const BLUES: [&str; 5] = ["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"];

    /// Five-class diverging red to blue.
    pub const RED_BLUE: [&str; 5] = ["#ca0020", "#f4a582", "#f7f7f7", "#92c5de", "#0571b0"];
}

/// Visualization configurations as JSON.
pub mod configs {
    /// Quantile classes over the blues, bicubic interpolation.
    pub const QUANTILE_BLUES: &str = r##"{
        "classifier": { "type": "quantile", "no_data_value": 0 },
        "colors": ["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"],
        "interpolator": "bicubic",
        "colorizer": "gradient"
    }"##;

    /// Log-scaled equal intervals with stepped colors.
    pub const LOG_EQUAL_INTERVAL: &str = r##"{
        "classifier": {
            "type": "equal_interval",
            "scale": { "kind": "log", "domain": [1, 1000] }
        },
        "classes": 3,
        "colors": [[255, 255, 255], [128, 128, 128], [0, 0, 0]],
        "colorizer": "stepped"
    }"##;

    /// Dot density with no colors.
    pub const DOT_DENSITY: &str = r##"{
        "classifier": { "type": "equal_interval" },
        "classes": 1,
        "colorizer": "dot"
    }"##;

    /// Labeled choropleth with fixed breaks.
    pub const LABELED_CHOROPLETH: &str = r##"{
        "classifier": { "type": "fixed", "breaks": [10, 100] },
        "colors": ["white", "black"],
        "label_zoom": 12
    }"##;
}
