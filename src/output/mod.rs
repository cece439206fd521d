pub mod formatter;

pub use formatter::{
    format_breakdown, format_results_card, format_score, format_stored_card, score_band,
    should_use_colors, trait_bar, ScoreBand,
};
