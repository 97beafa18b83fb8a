//! Page reading: noise filtering, line reconstruction, and column
//! segmentation.

mod normalize;
mod options;
mod segment;

pub use normalize::{last_bold_index, normalize_blocks, Fragment, Line};
pub(crate) use options::same_size;
pub use options::{
    ExtractOptions, NoiseFilter, PageSection, LINE_MERGE_TOLERANCE, PAGE_NUMBER_SIZE,
    TRAINEE_AWARD_MARKER,
};
pub use segment::{
    classify_block, clean_topic, segment_page, single_column, PageLines, Region,
    COPYRIGHT_MARKER, GUTTER_SLACK,
};
