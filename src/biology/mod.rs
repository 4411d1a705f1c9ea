/// Module for mapping de novo sequence tags onto protein sequences
pub mod tag_matching;
