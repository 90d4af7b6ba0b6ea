pub const COMMENT_PREFIX: char = '#';
pub const READER_BUFFER_SIZE: usize = 64 * 1024;
