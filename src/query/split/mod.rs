pub use self::planar_split::PlanarSplit;
pub use self::split::{SplitOutput, SplitPrimitive, SplitPrimitiveError, SplitTolerances};
pub use self::splitter::{InvalidSplitter, Splitter};

mod planar_split;
mod split;
mod split_line_string;
mod split_polygon;
mod splitter;
