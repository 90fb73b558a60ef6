mod split_conservation;
mod splitter_from_drawing;
