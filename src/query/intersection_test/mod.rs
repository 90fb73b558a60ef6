//! Implementation details of the intersection tests between a geometry and a splitter.

pub use self::intersection_test_part_splitter::{
    intersection_test_geometry_splitter, intersection_test_line_string_splitter,
    intersection_test_part_splitter, intersection_test_polygon_splitter,
    intersection_test_segment_splitter,
};

mod intersection_test_part_splitter;
